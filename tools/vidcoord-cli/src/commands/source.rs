//! Resolve a video source.

use vidcoord_annotator::source::VideoSource;

pub fn run(input: &str, full: bool) -> anyhow::Result<()> {
    let source = VideoSource::parse(input);
    let src = source
        .resolve()
        .map_err(|e| anyhow::anyhow!("Failed to resolve video source: {e}"))?;

    if full || !src.starts_with("data:") {
        println!("{src}");
    } else {
        let header = src.split(',').next().unwrap_or_default();
        println!("{header},… ({} bytes)", src.len());
    }

    Ok(())
}
