use crate::CoreError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FOCUS_LENGTHS: [u32; 3] = [25, 50, 90];
pub const DEFAULT_SESSION_TYPE: &str = "read";

/// The focus-session lengths a user may pick, in minutes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct FocusLengths(Vec<u32>);

impl FocusLengths {
    pub fn new(mut minutes: Vec<u32>) -> Result<Self, CoreError> {
        minutes.sort_unstable();
        minutes.dedup();
        if minutes.is_empty() || minutes[0] == 0 {
            return Err(CoreError::Invalid("focus lengths must be positive"));
        }
        Ok(Self(minutes))
    }

    pub fn allowed(&self) -> &[u32] {
        &self.0
    }

    pub fn check(&self, minutes: u32) -> Result<u32, CoreError> {
        if self.0.contains(&minutes) {
            Ok(minutes)
        } else {
            Err(CoreError::Invalid("focus session length"))
        }
    }
}

impl Default for FocusLengths {
    fn default() -> Self {
        Self(DEFAULT_FOCUS_LENGTHS.to_vec())
    }
}

impl TryFrom<Vec<u32>> for FocusLengths {
    type Error = CoreError;

    fn try_from(minutes: Vec<u32>) -> Result<Self, Self::Error> {
        FocusLengths::new(minutes)
    }
}

impl From<FocusLengths> for Vec<u32> {
    fn from(l: FocusLengths) -> Self {
        l.0
    }
}

/// `mm:ss` for a countdown display.
pub fn format_remaining(total_seconds: u64) -> String {
    let (mins, secs) = (total_seconds / 60, total_seconds % 60);
    format!("{mins:02}:{secs:02}")
}
