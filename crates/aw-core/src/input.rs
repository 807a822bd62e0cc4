//! Splitting raw player input into a command and its arguments.

/// Split a line into a lowercase verb and its whitespace-separated arguments.
///
/// Returns `None` for blank input. Arguments keep their original case.
pub fn split_command(input: &str) -> Option<(String, Vec<String>)> {
    let mut words = input.split_whitespace();
    let verb = words.next()?.to_lowercase();
    let args = words.map(str::to_string).collect();
    Some((verb, args))
}
