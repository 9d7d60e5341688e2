//! SVG post-processing for linked diagrams.

use std::sync::LazyLock;

use regex::Regex;

static VIEW_BOX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"viewBox="([^"]+)""#).unwrap());

/// Grow the first `viewBox` by `padding` on every side.
///
/// `x y w h` becomes `x-p y-p w+2p h+2p`, so the pan/zoom viewer never clips
/// strokes at the edges. The SVG is returned unchanged when the attribute is
/// missing or does not hold exactly four numbers.
#[must_use]
pub fn pad_view_box(svg: &str, padding: u32) -> String {
    let Some(caps) = VIEW_BOX.captures(svg) else {
        return svg.to_owned();
    };
    let Some(value) = caps.get(1) else {
        return svg.to_owned();
    };

    let parts: Vec<f64> = match value
        .as_str()
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<Vec<f64>, _>>()
    {
        Ok(parts) if parts.len() == 4 && parts.iter().all(|n| n.is_finite()) => parts,
        _ => return svg.to_owned(),
    };

    let p = f64::from(padding);
    let padded = format!(
        "{} {} {} {}",
        parts[0] - p,
        parts[1] - p,
        parts[2] + 2.0 * p,
        parts[3] + 2.0 * p
    );

    let mut out = String::with_capacity(svg.len() + 8);
    out.push_str(&svg[..value.start()]);
    out.push_str(&padded);
    out.push_str(&svg[value.end()..]);
    out
}
