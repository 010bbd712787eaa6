use chrono::Local;

/// Two-digit year used as the order number suffix, from the local clock.
pub fn current_year_suffix() -> String {
    Local::now().format("%y").to_string()
}

/// Sequence part of an `NN/YY` number. Anything unparseable counts as 0.
pub fn sequence_of(numero: &str) -> u32 {
    numero
        .split('/')
        .next()
        .and_then(|seq| seq.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Next order number for `year` given the numbers already in use.
///
/// Takes the highest sequence among numbers ending in `/{year}` and adds one,
/// zero-padded to two digits. A year with no parseable numbers starts at `01`.
pub fn next_order_number<'a, I>(existing: I, year: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let suffix = format!("/{year}");
    let highest = existing
        .into_iter()
        .filter(|numero| numero.ends_with(&suffix))
        .map(sequence_of)
        .max()
        .unwrap_or(0);

    format!("{:02}/{}", highest + 1, year)
}
