//! Discrete height levels and the quantizer that assigns them.
//!
//! The quantizer is shared by the mesh pipeline and any text preview of the
//! same data: both must see identical level boundaries, so neither owns the
//! thresholds. Import [`quantize`] or [`quantize_cell`] wherever levels are
//! needed.

use crate::ActivityCell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the `count / max` ratio mapped to [`HeightLevel::Low`].
pub const LOW_THRESHOLD: f64 = 1.0 / 3.0;

/// Upper bound (exclusive) of the `count / max` ratio mapped to [`HeightLevel::Medium`].
///
/// Ratios from here up to (but excluding) 1.0 map to [`HeightLevel::High`];
/// a count equal to the maximum maps to [`HeightLevel::Top`].
pub const MEDIUM_THRESHOLD: f64 = 2.0 / 3.0;

/// Quantized activity intensity of one cell.
///
/// Levels order from `None` to `Top`. `Future` marks days that have not
/// happened yet; it sorts below everything and never has height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeightLevel {
    /// Date lies in the future; no data.
    Future,
    /// No activity.
    None,
    /// Below a third of the period maximum.
    Low,
    /// Below two thirds of the period maximum.
    Medium,
    /// At least two thirds of the maximum but not the maximum.
    High,
    /// Equal to (or above) the period maximum.
    Top,
}

impl HeightLevel {
    /// Every level, lowest first.
    pub const ALL: [Self; 6] = [
        Self::Future,
        Self::None,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Top,
    ];

    /// True for levels that produce a block in the model.
    ///
    /// ```
    /// use skyline_activity::HeightLevel;
    ///
    /// assert!(!HeightLevel::Future.is_solid());
    /// assert!(!HeightLevel::None.is_solid());
    /// assert!(HeightLevel::Low.is_solid());
    /// ```
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::Future | Self::None)
    }
}

/// Map a raw count to a level given the period's maximum count.
///
/// Total over all inputs:
/// - `count == 0` gives [`HeightLevel::None`], including when `context_max == 0`.
/// - `count >= context_max` (with `count > 0`) gives [`HeightLevel::Top`].
/// - otherwise the ratio `count / context_max` is bucketed by
///   [`LOW_THRESHOLD`] and [`MEDIUM_THRESHOLD`].
///
/// The result is non-decreasing in `count` for a fixed `context_max`.
///
/// # Example
///
/// ```
/// use skyline_activity::{quantize, HeightLevel};
///
/// assert_eq!(quantize(0, 10), HeightLevel::None);
/// assert_eq!(quantize(1, 10), HeightLevel::Low);
/// assert_eq!(quantize(5, 10), HeightLevel::Medium);
/// assert_eq!(quantize(7, 10), HeightLevel::High);
/// assert_eq!(quantize(10, 10), HeightLevel::Top);
/// assert_eq!(quantize(3, 0), HeightLevel::Top);
/// ```
#[must_use]
pub fn quantize(count: u32, context_max: u32) -> HeightLevel {
    if count == 0 {
        return HeightLevel::None;
    }
    if count >= context_max {
        return HeightLevel::Top;
    }

    let ratio = f64::from(count) / f64::from(context_max);
    if ratio < LOW_THRESHOLD {
        HeightLevel::Low
    } else if ratio < MEDIUM_THRESHOLD {
        HeightLevel::Medium
    } else {
        HeightLevel::High
    }
}

/// Level of a cell: [`HeightLevel::Future`] for future days, otherwise
/// [`quantize`] of its count.
///
/// ```
/// use skyline_activity::{quantize_cell, ActivityCell, HeightLevel};
///
/// assert_eq!(quantize_cell(&ActivityCell::future(), 10), HeightLevel::Future);
/// assert_eq!(quantize_cell(&ActivityCell::new(10), 10), HeightLevel::Top);
/// ```
#[must_use]
pub fn quantize_cell(cell: &ActivityCell, context_max: u32) -> HeightLevel {
    if cell.is_future {
        HeightLevel::Future
    } else {
        quantize(cell.count, context_max)
    }
}
