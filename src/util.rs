//! Small utility helpers used across modules.

use std::time::{SystemTime, UNIX_EPOCH};

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings. Cuts on a char boundary, since
/// API payloads are mostly multi-byte Arabic.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

/// Seconds since the Unix epoch (0 if the clock is before it).
pub fn unix_now() -> u64 {
  SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_fills_every_key() {
    let url = fill_template("{base}/ayah/{surah}:{ayah}/{edition}", &[
      ("base", "https://x/v1"),
      ("surah", "2"),
      ("ayah", "255"),
      ("edition", "ar.alafasy"),
    ]);
    assert_eq!(url, "https://x/v1/ayah/2:255/ar.alafasy");
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    let s = "الفاتحة";
    let t = trunc_for_log(s, 3);
    assert!(t.starts_with('ا'));
    assert!(t.ends_with("(14 bytes total)"));
    assert_eq!(trunc_for_log("short", 10), "short");
  }
}
