/// Transliterations applied after uppercasing
const REPLACEMENTS: [(char, &str); 5] = [
    (' ', "_"),
    ('Ä', "AE"),
    ('Ö', "OE"),
    ('Ü', "UE"),
    ('ß', "SS"),
];

/// Shell-friendly form of a display name, used in the `pipe://` command and
/// as the service name.
///
/// ```rust
/// use m3u2hts::tvheadend::safe_name;
///
/// assert_eq!(safe_name("Das Erste"), "DAS_ERSTE");
/// assert_eq!(safe_name("Süddeutsche Zeitung"), "SUEDDEUTSCHE_ZEITUNG");
/// ```
pub fn safe_name(name: &str) -> String {
    let mut safe = String::with_capacity(name.len());
    for c in name.to_uppercase().chars() {
        match REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => safe.push_str(to),
            None => safe.push(c),
        }
    }
    safe
}
