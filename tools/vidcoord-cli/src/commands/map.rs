//! Map a single click.

use anyhow::{anyhow, Context};

use vidcoord_annotator::mapper::{map, ContentRect};
use vidcoord_model::geometry::{DisplayGeometry, IntrinsicSize, PointerPosition};

pub fn run(intrinsic: &str, display_box: &str, origin: &str, at: &str) -> anyhow::Result<()> {
    let size = parse_size(intrinsic).context("invalid --intrinsic")?;
    let (width, height) = parse_pair(display_box, 'x').context("invalid --box")?;
    let (origin_x, origin_y) = parse_pair(origin, ',').context("invalid --origin")?;
    let (client_x, client_y) = parse_pair(at, ',').context("invalid --at")?;

    let geometry = DisplayGeometry::new(width, height, origin_x, origin_y);
    if let Some(rect) = ContentRect::fit(&geometry, size) {
        println!(
            "Content: {:.1}x{:.1} at offset ({:.1}, {:.1}), scale {:.4}",
            rect.content_width, rect.content_height, rect.offset_x, rect.offset_y, rect.scale
        );
    }

    match map(PointerPosition::new(client_x, client_y), &geometry, size) {
        Ok(point) => {
            let (x, y) = point.rounded();
            println!(
                "Intrinsic: ({x}, {y}) [unrounded {:.2}, {:.2}] in {size}",
                point.x, point.y
            );
        }
        Err(rejected) => println!("Rejected: {rejected}"),
    }

    Ok(())
}

fn parse_size(input: &str) -> anyhow::Result<IntrinsicSize> {
    let (w, h) = input
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got {input:?}"))?;
    Ok(IntrinsicSize::new(w.trim().parse()?, h.trim().parse()?))
}

fn parse_pair(input: &str, separator: char) -> anyhow::Result<(f64, f64)> {
    let (a, b) = input
        .split_once(separator)
        .ok_or_else(|| anyhow!("expected two numbers separated by {separator:?}, got {input:?}"))?;
    Ok((a.trim().parse()?, b.trim().parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1920x1080").unwrap(), IntrinsicSize::new(1920, 1080));
        assert_eq!(parse_size("640X360").unwrap(), IntrinsicSize::new(640, 360));
        assert!(parse_size("1920").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("100, 12.5", ',').unwrap(), (100.0, 12.5));
        assert_eq!(parse_pair("640x480", 'x').unwrap(), (640.0, 480.0));
        assert!(parse_pair("100", ',').is_err());
    }
}
