//! Parsing of `sacctmgr --parsable2` output.
//!
//! `--parsable2` prints one record per line with fields separated by `|` and
//! no trailing delimiter; combined with `--noheader` the output is purely
//! data rows.

/// Split output into rows of pipe-separated fields, dropping blank lines.
pub fn rows(output: &str) -> Vec<Vec<String>> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| line.split('|').map(str::to_string).collect())
        .collect()
}

/// The first field of every row (e.g. account names).
pub fn single_column(output: &str) -> Vec<String> {
    rows(output)
        .into_iter()
        .filter_map(|row| row.into_iter().next())
        .filter(|field| !field.is_empty())
        .collect()
}

/// The first two fields of every row, with an empty second field read as
/// absent (a user with no default account).
pub fn two_columns(output: &str) -> Vec<(String, Option<String>)> {
    rows(output)
        .into_iter()
        .filter_map(|row| {
            let mut fields = row.into_iter();
            let first = fields.next()?;
            if first.is_empty() {
                return None;
            }
            let second = fields.next().filter(|f| !f.is_empty());
            Some((first, second))
        })
        .collect()
}
