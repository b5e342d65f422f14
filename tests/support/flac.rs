use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::error::Verify;
use flacenc::source::MemSource;
use std::fs;
use std::path::{Path, PathBuf};

const VORBIS_COMMENT: u8 = 4;
const LAST_BLOCK: u8 = 0x80;

/// Encode a short stretch of stereo silence to FLAC
fn encode_silence() -> Vec<u8> {
    let samples = vec![0i32; 4096 * 2];
    let source = MemSource::from_samples(&samples, 2, 16, 44100);

    let config = match flacenc::config::Encoder::default().into_verified() {
        Ok(config) => config,
        Err((_, e)) => panic!("Failed to verify encoder config: {:?}", e),
    };
    let stream = flacenc::encode_with_fixed_block_size(&config, source, 4096).unwrap();

    let mut sink = ByteSink::new();
    stream.write(&mut sink).unwrap();
    sink.as_slice().to_vec()
}

fn vorbis_comment_block(comments: &[(&str, &str)]) -> Vec<u8> {
    let vendor = b"release-matcher tests";
    let mut body = Vec::new();
    body.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    body.extend_from_slice(vendor);
    body.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for (key, value) in comments {
        let comment = format!("{}={}", key, value);
        body.extend_from_slice(&(comment.len() as u32).to_le_bytes());
        body.extend_from_slice(comment.as_bytes());
    }

    let mut block = vec![LAST_BLOCK | VORBIS_COMMENT];
    block.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
    block.extend_from_slice(&body);
    block
}

/// Write `relative` under `root` as a real FLAC file carrying `comments`
/// (`KEY`, `value`) in a Vorbis comment block after the stream's own metadata
pub fn write_tagged_flac(root: &Path, relative: &str, comments: &[(&str, &str)]) -> PathBuf {
    let mut bytes = encode_silence();
    assert_eq!(&bytes[..4], b"fLaC");

    // Metadata block header: last flag + type, then a 24-bit big-endian length
    let mut offset = 4;
    loop {
        let is_last = bytes[offset] & LAST_BLOCK != 0;
        let length = u32::from_be_bytes([0, bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
            as usize;
        if is_last {
            bytes[offset] &= !LAST_BLOCK;
            offset += 4 + length;
            break;
        }
        offset += 4 + length;
    }
    let frames = bytes.split_off(offset);
    bytes.extend_from_slice(&vorbis_comment_block(comments));
    bytes.extend_from_slice(&frames);

    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, bytes).unwrap();
    path
}
