//! Reference time-allocation pie charts.
//!
//! Breakdowns are computed from the static category registry only. They
//! describe a reference day, not the user's constructed schedule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::{CategoryRegistry, TimeCategory};
use crate::error::ValidationError;

/// Which reference budget to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsContext {
    Weekday,
    Weekend,
}

impl AnalyticsContext {
    fn minutes(self, category: &TimeCategory) -> u32 {
        match self {
            AnalyticsContext::Weekday => category.weekday_minutes,
            AnalyticsContext::Weekend => category.weekend_minutes,
        }
    }
}

impl FromStr for AnalyticsContext {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weekday" => Ok(Self::Weekday),
            "weekend" => Ok(Self::Weekend),
            _ => Err(ValidationError::InvalidValue {
                field: "context".into(),
                message: format!("expected 'weekday' or 'weekend', got '{s}'"),
            }),
        }
    }
}

impl fmt::Display for AnalyticsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsContext::Weekday => f.write_str("weekday"),
            AnalyticsContext::Weekend => f.write_str("weekend"),
        }
    }
}

/// Circle the slices are drawn on, in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieGeometry {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Default for PieGeometry {
    fn default() -> Self {
        Self {
            cx: 100.0,
            cy: 100.0,
            radius: 80.0,
        }
    }
}

impl PieGeometry {
    /// Point on the circle at `angle` degrees clockwise from 12 o'clock.
    fn point(&self, angle: f64) -> (f64, f64) {
        let rad = (angle - 90.0).to_radians();
        (self.cx + self.radius * rad.cos(), self.cy + self.radius * rad.sin())
    }

    /// Closed sector path from `start` to `end` degrees.
    fn sector_path(&self, start: f64, end: f64) -> String {
        let (x1, y1) = self.point(start);
        let r = self.radius;
        let sweep = end - start;

        // A single arc cannot describe a full circle; split it in half.
        if sweep >= 360.0 {
            let (xm, ym) = self.point(start + 180.0);
            return format!(
                "M {cx:.3} {cy:.3} L {x1:.3} {y1:.3} A {r} {r} 0 1 1 {xm:.3} {ym:.3} A {r} {r} 0 1 1 {x1:.3} {y1:.3} Z",
                cx = self.cx,
                cy = self.cy,
            );
        }

        let (x2, y2) = self.point(end);
        let large_arc = u8::from(sweep > 180.0);
        format!(
            "M {cx:.3} {cy:.3} L {x1:.3} {y1:.3} A {r} {r} 0 {large_arc} 1 {x2:.3} {y2:.3} Z",
            cx = self.cx,
            cy = self.cy,
        )
    }
}

/// One category's sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub category: String,
    pub color: String,
    pub minutes: u32,
    /// Share of the total, rounded to a whole percent
    pub percentage: u32,
    pub start_angle: f64,
    pub sweep: f64,
    pub end_angle: f64,
    /// SVG path data for the sector
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub context: AnalyticsContext,
    pub total_minutes: u32,
    pub slices: Vec<PieSlice>,
}

/// Computes pie breakdowns from the registry.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsAggregator {
    geometry: PieGeometry,
}

impl AnalyticsAggregator {
    pub fn new(geometry: PieGeometry) -> Self {
        Self { geometry }
    }

    /// Slices in registry order, starting at 12 o'clock and sweeping clockwise.
    ///
    /// Categories with zero minutes still get a (zero-width) slice so the
    /// output lines up with the registry. A zero total yields no slices.
    pub fn breakdown(&self, registry: &CategoryRegistry, context: AnalyticsContext) -> CategoryBreakdown {
        let total: u32 = registry.categories().iter().map(|c| context.minutes(c)).sum();
        if total == 0 {
            return CategoryBreakdown {
                context,
                total_minutes: 0,
                slices: Vec::new(),
            };
        }

        let mut start_angle = 0.0;
        let slices = registry
            .categories()
            .iter()
            .map(|category| {
                let minutes = context.minutes(category);
                let share = f64::from(minutes) / f64::from(total);
                let sweep = share * 360.0;
                let end_angle = start_angle + sweep;
                let slice = PieSlice {
                    category: category.name.clone(),
                    color: category.color.clone(),
                    minutes,
                    percentage: (share * 100.0).round() as u32,
                    start_angle,
                    sweep,
                    end_angle,
                    path: self.geometry.sector_path(start_angle, end_angle),
                };
                start_angle = end_angle;
                slice
            })
            .collect();

        CategoryBreakdown {
            context,
            total_minutes: total,
            slices,
        }
    }

    /// Weekday and weekend breakdowns together.
    pub fn both(&self, registry: &CategoryRegistry) -> [CategoryBreakdown; 2] {
        [
            self.breakdown(registry, AnalyticsContext::Weekday),
            self.breakdown(registry, AnalyticsContext::Weekend),
        ]
    }
}
