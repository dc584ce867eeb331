//! Command: print version information.

/// Version string reported by `idepot version`.
#[must_use]
pub fn version_line() -> String {
    let version = option_env!("IDEPOT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    format!("idepot {version}")
}

/// Print the idepot version to stdout.
pub fn run() {
    println!("{}", version_line());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_line_names_the_program() {
        assert!(version_line().starts_with("idepot "));
        assert!(version_line().len() > "idepot ".len());
    }
}
