//! Activity charts and headline statistics.
//!
//! Line and bar series are random on every render, drawn from a caller-supplied
//! RNG so tests can seed it. The pie breakdown is fixed per role.

use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use medichain_contracts::{
    error::{PortalError, PortalResult},
    session::Role,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    Month,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Week, TimeRange::Month, TimeRange::Year];

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Week => "Week",
            TimeRange::Month => "Month",
            TimeRange::Year => "Year",
        }
    }

    /// X-axis labels for this range.
    pub fn labels(self) -> Vec<String> {
        let fixed: &[&str] = match self {
            TimeRange::Week => &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            TimeRange::Month => &["Week 1", "Week 2", "Week 3", "Week 4"],
            TimeRange::Year => &[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
        };
        fixed.iter().map(|s| s.to_string()).collect()
    }

    pub fn next(self) -> Self {
        match self {
            TimeRange::Week => TimeRange::Month,
            TimeRange::Month => TimeRange::Year,
            TimeRange::Year => TimeRange::Week,
        }
    }
}

impl FromStr for TimeRange {
    type Err = PortalError;

    fn from_str(s: &str) -> PortalResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            _ => Err(PortalError::validation("range", format!("unknown time range '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

impl ChartKind {
    pub fn next(self) -> Self {
        match self {
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Pie,
            ChartKind::Pie => ChartKind::Line,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
            ChartKind::Pie => "Pie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub label: &'static str,
    pub percent: u32,
}

/// Everything one chart render needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub pie: Vec<PieSlice>,
}

/// Build chart data for `role` over `range`, drawing series values from `rng`.
pub fn chart_data<R: Rng>(role: Role, range: TimeRange, rng: &mut R) -> ChartData {
    let labels = range.labels();
    let points = labels.len();
    let mut series = |name, lo: u32, hi: u32| Series {
        name,
        values: (0..points).map(|_| rng.gen_range(lo..=hi)).collect(),
    };

    match role {
        Role::Doctor => ChartData {
            title: "Patient Activity",
            series: vec![series("Appointments", 5, 20), series("New Patients", 1, 10)],
            pie: pie(&[
                ("Appointments", 35),
                ("New Patients", 15),
                ("Follow-ups", 25),
                ("Procedures", 10),
                ("Consultations", 15),
            ]),
            labels,
        },
        Role::Patient => ChartData {
            title: "Health Activity",
            series: vec![series("Appointments", 0, 3), series("Health Score", 70, 95)],
            pie: pie(&[
                ("Regular Check-ups", 40),
                ("Specialist Visits", 20),
                ("Lab Tests", 15),
                ("Procedures", 5),
                ("Pharmacy Visits", 20),
            ]),
            labels,
        },
    }
}

fn pie(slices: &[(&'static str, u32)]) -> Vec<PieSlice> {
    slices
        .iter()
        .map(|&(label, percent)| PieSlice { label, percent })
        .collect()
}

/// A headline statistic with its change against the previous period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    /// Percentage-point change. Zero renders as no change.
    pub change: i32,
}

impl StatCard {
    pub fn change_label(&self) -> String {
        match self.change {
            0 => "no change".to_string(),
            c if c > 0 => format!("+{}%", c),
            c => format!("{}%", c),
        }
    }
}

pub fn stats(role: Role) -> Vec<StatCard> {
    let card = |title, value, change| StatCard { title, value, change };
    match role {
        Role::Doctor => vec![
            card("Total Patients", "248", 12),
            card("Appointments This Month", "86", 5),
            card("Completion Rate", "94%", 2),
        ],
        Role::Patient => vec![
            card("Upcoming Appointments", "3", 0),
            card("Health Score", "85%", 8),
            card("Medication Adherence", "92%", -3),
        ],
    }
}
