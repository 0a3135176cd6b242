/// Reformats raw phone input into `+<country><digits>`.
///
/// Every non-digit is dropped. Digits starting with `1` are taken to already
/// carry the US country code; anything else gets `+1` prepended. Input with no
/// digits at all still yields `"+1"`.
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
    if digits.starts_with('1') {
        format!("+{digits}")
    } else {
        format!("+1{digits}")
    }
}
