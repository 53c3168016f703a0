/// Live accuracy of the input buffer against the target word, in percent.
///
/// Matches are counted position by position over the overlap, but the
/// denominator is the input length, so over-typing drags the value down
/// and a short correct prefix reads as 100.
pub fn accuracy(user_input: &str, current_word: &str) -> u32 {
    if user_input.is_empty() || current_word.is_empty() {
        return 100;
    }

    let matches = user_input
        .chars()
        .zip(current_word.chars())
        .filter(|(typed, expected)| typed == expected)
        .count();
    let typed = user_input.chars().count();

    (100.0 * matches as f64 / typed as f64).round() as u32
}
