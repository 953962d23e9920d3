use std::fmt;

use serde::{Deserialize, Serialize};

/// Names of the four simulator inputs, in command-line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKey {
    MinConnectivity,
    MeanTxInterarrival,
    MeanBlockInterarrival,
    MeanLinkSpeed,
}

impl ParameterKey {
    pub const ALL: [ParameterKey; 4] = [
        ParameterKey::MinConnectivity,
        ParameterKey::MeanTxInterarrival,
        ParameterKey::MeanBlockInterarrival,
        ParameterKey::MeanLinkSpeed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParameterKey::MinConnectivity => "min_connectivity",
            ParameterKey::MeanTxInterarrival => "mean_tx_interarrival",
            ParameterKey::MeanBlockInterarrival => "mean_block_interarrival",
            ParameterKey::MeanLinkSpeed => "mean_link_speed",
        }
    }
}

/// One complete set of simulator inputs. Values stay string-encoded since
/// they are only ever handed to the simulator as arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    min_connectivity: String,
    mean_tx_interarrival: String,
    mean_block_interarrival: String,
    mean_link_speed: String,
}

impl ParameterSet {
    pub fn new(
        min_connectivity: impl Into<String>,
        mean_tx_interarrival: impl Into<String>,
        mean_block_interarrival: impl Into<String>,
        mean_link_speed: impl Into<String>,
    ) -> Self {
        Self {
            min_connectivity: min_connectivity.into(),
            mean_tx_interarrival: mean_tx_interarrival.into(),
            mean_block_interarrival: mean_block_interarrival.into(),
            mean_link_speed: mean_link_speed.into(),
        }
    }

    pub fn get(&self, key: ParameterKey) -> &str {
        match key {
            ParameterKey::MinConnectivity => &self.min_connectivity,
            ParameterKey::MeanTxInterarrival => &self.mean_tx_interarrival,
            ParameterKey::MeanBlockInterarrival => &self.mean_block_interarrival,
            ParameterKey::MeanLinkSpeed => &self.mean_link_speed,
        }
    }

    /// Copy of this set with `key` replaced by `value`.
    pub fn with_value(&self, key: ParameterKey, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match key {
            ParameterKey::MinConnectivity => &mut next.min_connectivity,
            ParameterKey::MeanTxInterarrival => &mut next.mean_tx_interarrival,
            ParameterKey::MeanBlockInterarrival => &mut next.mean_block_interarrival,
            ParameterKey::MeanLinkSpeed => &mut next.mean_link_speed,
        };
        *slot = value.into();
        next
    }

    /// Positional arguments for the simulator:
    /// connectivity, tx interarrival, block interarrival, link speed.
    pub fn as_args(&self) -> [&str; 4] {
        [
            &self.min_connectivity,
            &self.mean_tx_interarrival,
            &self.mean_block_interarrival,
            &self.mean_link_speed,
        ]
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in ParameterKey::ALL.iter().zip(self.as_args()).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key.name(), value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_follow_command_line_order() {
        let params = ParameterSet::new("4", "10", "100", "2");
        assert_eq!(params.as_args(), ["4", "10", "100", "2"]);
        for (key, arg) in ParameterKey::ALL.iter().zip(params.as_args()) {
            assert_eq!(params.get(*key), arg);
        }
    }

    #[test]
    fn with_value_leaves_original_untouched() {
        let base = ParameterSet::new("4", "10", "100", "2");
        let swept = base.with_value(ParameterKey::MeanLinkSpeed, "30");

        assert_eq!(base.get(ParameterKey::MeanLinkSpeed), "2");
        assert_eq!(swept.get(ParameterKey::MeanLinkSpeed), "30");
        assert_eq!(swept.get(ParameterKey::MinConnectivity), "4");
        assert_eq!(
            swept.to_string(),
            "min_connectivity=4 mean_tx_interarrival=10 mean_block_interarrival=100 mean_link_speed=30"
        );
    }
}
