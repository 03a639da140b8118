use crate::force::ForceDirected;
use crate::layered::{LevelLayout, TreeLayout};
use crate::radial::{CircleLayout, GridLayout, HubRadialLayout};
use crate::{LayoutConfig, LayoutContext, NodeKey};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A layout strategy that assigns a position to every node of a context
///
/// Implementations must write every entry of `ctx.positions`. They may set
/// `ctx.styles` but never read caller styles.
pub trait LayoutStrategy<N: NodeKey> {
    fn place(&self, ctx: &mut LayoutContext<N>, config: &LayoutConfig);
}

/// Layout selector understood by the editor
///
/// Parsing never fails: unknown tags select [`LayoutMode::Force`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayoutMode {
    #[default]
    Force,
    Tree,
    Level,
    Circle,
    Grid,
    HubRadial,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 6] = [
        LayoutMode::Force,
        LayoutMode::Tree,
        LayoutMode::Level,
        LayoutMode::Circle,
        LayoutMode::Grid,
        LayoutMode::HubRadial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Force => "force",
            LayoutMode::Tree => "tree",
            LayoutMode::Level => "level",
            LayoutMode::Circle => "circle",
            LayoutMode::Grid => "grid",
            LayoutMode::HubRadial => "hubRadial",
        }
    }
}

impl From<&str> for LayoutMode {
    fn from(tag: &str) -> Self {
        match tag {
            "force" => LayoutMode::Force,
            "tree" => LayoutMode::Tree,
            "level" => LayoutMode::Level,
            "circle" => LayoutMode::Circle,
            "grid" => LayoutMode::Grid,
            "hubRadial" => LayoutMode::HubRadial,
            other => {
                debug!("Unknown layout mode {other:?}, using force");
                LayoutMode::Force
            }
        }
    }
}

impl From<String> for LayoutMode {
    fn from(tag: String) -> Self {
        LayoutMode::from(tag.as_str())
    }
}

impl From<LayoutMode> for String {
    fn from(mode: LayoutMode) -> Self {
        mode.as_str().to_string()
    }
}

impl FromStr for LayoutMode {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(LayoutMode::from(tag))
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<N: NodeKey> LayoutStrategy<N> for LayoutMode {
    fn place(&self, ctx: &mut LayoutContext<N>, config: &LayoutConfig) {
        match self {
            LayoutMode::Force => ForceDirected.place(ctx, config),
            LayoutMode::Tree => TreeLayout.place(ctx, config),
            LayoutMode::Level => LevelLayout.place(ctx, config),
            LayoutMode::Circle => CircleLayout.place(ctx, config),
            LayoutMode::Grid => GridLayout.place(ctx, config),
            LayoutMode::HubRadial => HubRadialLayout.place(ctx, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn tags_round_trip() {
        for mode in LayoutMode::ALL {
            assert_eq!(LayoutMode::from(mode.as_str()), mode);
            assert_eq!(mode.to_string().parse::<LayoutMode>(), Ok(mode));
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_force() {
        assert_eq!(LayoutMode::from("spiral"), LayoutMode::Force);
        assert_eq!(LayoutMode::from(""), LayoutMode::Force);
        assert_eq!(LayoutMode::from("HubRadial"), LayoutMode::Force);
        assert_eq!(LayoutMode::default(), LayoutMode::Force);
    }

    #[test]
    fn serde_uses_editor_tags() {
        let mode: LayoutMode = serde_json::from_str(r#""hubRadial""#).unwrap();
        assert_eq!(mode, LayoutMode::HubRadial);
        let mode: LayoutMode = serde_json::from_str(r#""bogus""#).unwrap();
        assert_eq!(mode, LayoutMode::Force);
        assert_eq!(serde_json::to_string(&LayoutMode::Level).unwrap(), r#""level""#);
    }
}
