use super::{Dimensions, Placement};
use anyhow::anyhow;
use serde_derive::{Deserialize, Serialize};
use std::str::FromStr;

/// Edge or corner a single overlay is anchored to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    #[serde(alias = "center")]
    Centre,
}

impl FromStr for Gravity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Gravity::*;
        match s.to_lowercase().as_ref() {
            "north" | "n" | "top" => Ok(North),
            "northeast" | "ne" => Ok(NorthEast),
            "east" | "e" | "right" => Ok(East),
            "southeast" | "se" => Ok(SouthEast),
            "south" | "s" | "bottom" => Ok(South),
            "southwest" | "sw" => Ok(SouthWest),
            "west" | "w" | "left" => Ok(West),
            "northwest" | "nw" => Ok(NorthWest),
            "centre" | "center" => Ok(Centre),
            _ => Err(anyhow!("Unknown gravity {}", s)),
        }
    }
}

impl Gravity {
    /// Top-left offset that anchors an overlay of size `overlay` to this edge of `canvas`.
    pub fn offset(self, canvas: Dimensions, overlay: Dimensions) -> (i64, i64) {
        use Gravity::*;
        let free_x = canvas.width as i64 - overlay.width as i64;
        let free_y = canvas.height as i64 - overlay.height as i64;

        let x = match self {
            West | NorthWest | SouthWest => 0,
            North | Centre | South => free_x / 2,
            East | NorthEast | SouthEast => free_x,
        };
        let y = match self {
            North | NorthWest | NorthEast => 0,
            West | Centre | East => free_y / 2,
            South | SouthWest | SouthEast => free_y,
        };
        (x, y)
    }

    pub fn place<O>(self, overlay: O, canvas: Dimensions, size: Dimensions) -> Placement<O> {
        let (left, top) = self.offset(canvas, size);
        Placement::new(overlay, left, top)
    }
}
