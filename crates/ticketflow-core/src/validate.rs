//! Structural checklist for a single ticket document.
//!
//! A well-formed ticket declares its metadata (`depends_on`, `estimated_time`
//! and `priority`), has every required section and a small number of
//! acceptance criteria, and is sized to a few hours of work. Each satisfied
//! metadata field and each present section scores one point.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Sections every ticket must have, in document order.
pub const REQUIRED_SECTIONS: [&str; 9] = [
    "Summary",
    "Why",
    "Scope",
    "Out-of-Scope",
    "Acceptance Criteria",
    "Implementation Steps",
    "Test/Validation",
    "Files to Modify/Add",
    "Definition of Done",
];

/// Section whose absence is reported as a critical error.
pub const MANDATORY_SECTION: &str = "Out-of-Scope";

/// Metadata fields checked, one point each.
const METADATA_POINTS: u32 = 3;

/// Highest possible score.
pub const MAX_SCORE: u32 = METADATA_POINTS + REQUIRED_SECTIONS.len() as u32;

static DEPENDS_ON_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"depends_on(\*\*)?:").expect("valid depends_on regex"));

static ESTIMATED_TIME_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"estimated_time(\*\*)?:").expect("valid estimated_time regex"));

static PRIORITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"priority(\*\*)?:\s*(P[0-4])").expect("valid priority regex"));

static TIME_ESTIMATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"estimated_time(\*\*)?:\s*(\d+)-(\d+)h").expect("valid time estimate regex")
});

static AC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-\s*\[\s*[xX]?\s*\]\s*\*\*AC\d+\*\*:").expect("valid acceptance criteria regex")
});

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.+)$").expect("valid heading regex"));

/// Thresholds applied by [`validate_ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Fewer acceptance criteria than this is a warning
    pub ac_min: usize,
    /// More acceptance criteria than this is a warning
    pub ac_max: usize,
    /// Upper estimate at or below this is ideal
    pub ideal_max_hours: u32,
    /// Upper estimate above this is an error
    pub max_hours: u32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            ac_min: 3,
            ac_max: 5,
            ideal_max_hours: 4,
            max_hours: 6,
        }
    }
}

/// Overall verdict derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grade {
    /// 10 points or more
    Excellent,
    /// 8 or 9 points
    Good,
    /// 6 or 7 points
    Acceptable,
    /// Below 6 points
    NeedsImprovement,
}

impl Grade {
    /// Grade for a score.
    pub fn from_score(score: u32) -> Self {
        match score {
            10.. => Self::Excellent,
            8..=9 => Self::Good,
            6..=7 => Self::Acceptable,
            _ => Self::NeedsImprovement,
        }
    }

    /// One-line verdict shown at the end of a report.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent - Ready for execution",
            Self::Good => "Good - Minor improvements suggested",
            Self::Acceptable => "Acceptable - Needs revision",
            Self::NeedsImprovement => "Needs improvement - Must revise before execution",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verdict())
    }
}

/// Outcome of checking one ticket document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Points earned
    pub score: u32,
    /// Points available
    pub max_score: u32,
    /// Problems that make the ticket invalid
    pub errors: Vec<String>,
    /// Problems worth fixing that do not invalidate the ticket
    pub warnings: Vec<String>,
    /// Number of acceptance criteria found
    pub acceptance_criteria: usize,
    /// Verdict for the score
    pub grade: Grade,
}

impl ValidationReport {
    /// Whether the ticket passed (no errors, warnings allowed).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Accumulates score, errors and warnings while checks run.
#[derive(Default)]
struct Checklist {
    score: u32,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Checklist {
    fn point_or_error(&mut self, ok: bool, error: impl Into<String>) {
        if ok {
            self.score += 1;
        } else {
            self.errors.push(error.into());
        }
    }
}

fn check_metadata(content: &str, list: &mut Checklist) {
    list.point_or_error(
        DEPENDS_ON_FIELD_RE.is_match(content),
        "Missing 'depends_on:' field",
    );
    list.point_or_error(
        ESTIMATED_TIME_FIELD_RE.is_match(content),
        "Missing 'estimated_time:' field",
    );
    list.point_or_error(
        PRIORITY_RE.is_match(content),
        "Missing or invalid 'priority:' field",
    );
}

fn check_sections(content: &str, list: &mut Checklist) {
    let headings: Vec<&str> = content
        .lines()
        .filter_map(|line| HEADING_RE.captures(line).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().trim())
        .collect();

    for section in REQUIRED_SECTIONS {
        let present = headings.iter().any(|heading| heading.starts_with(section));
        list.point_or_error(present, format!("Missing section: {section}"));
        if !present && section == MANDATORY_SECTION {
            list.errors
                .push(format!("CRITICAL: {MANDATORY_SECTION} section is mandatory!"));
        }
    }
}

fn check_acceptance_criteria(content: &str, rules: &ValidationRules, list: &mut Checklist) -> usize {
    let count = AC_RE.find_iter(content).count();

    if count == 0 {
        list.warnings.push("No Acceptance Criteria found".to_string());
    } else if count < rules.ac_min {
        list.warnings.push(format!(
            "Only {count} AC (recommended: {}-{})",
            rules.ac_min, rules.ac_max
        ));
    } else if count > rules.ac_max {
        list.warnings.push(format!(
            "{count} AC (recommended: {}-{}, may be too many)",
            rules.ac_min, rules.ac_max
        ));
    }

    count
}

fn check_time_estimate(content: &str, rules: &ValidationRules, list: &mut Checklist) {
    let Some(caps) = TIME_ESTIMATE_RE.captures(content) else {
        return;
    };
    // Digit runs too long for u32 are not realistic estimates
    let (Ok(min_hours), Ok(max_hours)) = (caps[2].parse::<u32>(), caps[3].parse::<u32>()) else {
        list.errors
            .push("Time estimate is too large (should split ticket)".to_string());
        return;
    };

    if max_hours <= rules.ideal_max_hours {
        return;
    }

    if max_hours <= rules.max_hours {
        list.warnings.push(format!(
            "Time estimate {min_hours}-{max_hours}h is on the high side (ideal: 2-{}h)",
            rules.ideal_max_hours
        ));
    } else {
        list.errors.push(format!(
            "Time estimate {min_hours}-{max_hours}h is too large (should split ticket)"
        ));
    }
}

/// Check a ticket document against the structural checklist.
pub fn validate_ticket(content: &str, rules: &ValidationRules) -> ValidationReport {
    let mut list = Checklist::default();

    check_metadata(content, &mut list);
    check_sections(content, &mut list);
    let acceptance_criteria = check_acceptance_criteria(content, rules, &mut list);
    check_time_estimate(content, rules, &mut list);

    tracing::debug!(
        score = list.score,
        errors = list.errors.len(),
        warnings = list.warnings.len(),
        "Validated ticket"
    );

    ValidationReport {
        score: list.score,
        max_score: MAX_SCORE,
        errors: list.errors,
        warnings: list.warnings,
        acceptance_criteria,
        grade: Grade::from_score(list.score),
    }
}
