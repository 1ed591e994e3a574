pub mod allocate;
pub mod estimate;
pub mod init;
pub mod mock;
pub mod plan;
pub mod sample;
pub mod validate;

use anyhow::Result;

use studyplan_core::allocation::AllocationMethod;
use studyplan_core::config::StudyplanConfig;

/// A `--method` flag wins over the configured method.
pub(crate) fn resolve_method(
    method: Option<String>,
    config: &StudyplanConfig,
) -> Result<AllocationMethod> {
    match method {
        Some(m) => Ok(m.parse()?),
        None => Ok(config.allocation.method),
    }
}

/// Option labels run `a` to `z`, then fall back to 1-based numbers.
pub(crate) fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'a' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_labels_stay_unique_past_z() {
        assert_eq!(option_label(0), "a");
        assert_eq!(option_label(25), "z");
        assert_eq!(option_label(26), "27");
        assert_eq!(option_label(300), "301");

        let labels: std::collections::HashSet<String> = (0..60).map(option_label).collect();
        assert_eq!(labels.len(), 60);
    }
}
