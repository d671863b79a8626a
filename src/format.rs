//! Secret masking for logs (defmt / Debug output)

use heapless::String;

/// Number of leading characters left visible by [`mask_secret`].
const VISIBLE_PREFIX: usize = 2;

/// Mask a credential for display: `"hunter22"` -> `"hu***"`.
/// Values of 4 characters or fewer are fully hidden (`"***"`) so the
/// prefix never gives away most of a short secret. Empty stays empty.
pub fn mask_secret(v: &str) -> String<32> {
    let mut s: String<32> = String::new();
    if v.is_empty() {
        return s;
    }
    if v.chars().count() > 4 {
        for c in v.chars().take(VISIBLE_PREFIX) {
            let _ = s.push(c);
        }
    }
    let _ = s.push_str("***");
    s
}
