use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HackError;

/// The three sequential phases every hack goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Pre,
    Hack,
    Post,
}

impl PhaseKind {
    pub const ALL: [PhaseKind; 3] = [PhaseKind::Pre, PhaseKind::Hack, PhaseKind::Post];

    pub fn label(self) -> &'static str {
        match self {
            PhaseKind::Pre => "Pre-Event",
            PhaseKind::Hack => "Actual Hack",
            PhaseKind::Post => "Post-Event",
        }
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phases {
    pub pre: DateRange,
    pub hack: DateRange,
    pub post: DateRange,
}

impl Phases {
    /// Contiguous default schedule for a hack planned from `today`.
    pub fn starting(today: NaiveDate) -> Self {
        let day = |n| today + Duration::days(n);
        Self {
            pre: DateRange::new(today, day(2)),
            hack: DateRange::new(day(3), day(5)),
            post: DateRange::new(day(6), day(10)),
        }
    }

    pub fn get(&self, kind: PhaseKind) -> DateRange {
        match kind {
            PhaseKind::Pre => self.pre,
            PhaseKind::Hack => self.hack,
            PhaseKind::Post => self.post,
        }
    }

    pub fn get_mut(&mut self, kind: PhaseKind) -> &mut DateRange {
        match kind {
            PhaseKind::Pre => &mut self.pre,
            PhaseKind::Hack => &mut self.hack,
            PhaseKind::Post => &mut self.post,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PhaseKind, DateRange)> + '_ {
        PhaseKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Re-chain the hack phase after the pre-event end moved.
    pub fn chain_after_pre(&mut self) {
        self.hack.start = self.pre.end + Duration::days(1);
        if self.hack.end < self.hack.start {
            self.hack.end = self.hack.start + Duration::days(2);
        }
    }

    /// Re-chain the post-event phase after the hack end moved.
    pub fn chain_after_hack(&mut self) {
        self.post.start = self.hack.end + Duration::days(1);
        if self.post.end < self.post.start {
            self.post.end = self.post.start + Duration::days(4);
        }
    }

    /// Overall span from the pre-event start to the post-event end.
    pub fn span(&self) -> DateRange {
        DateRange::new(self.pre.start, self.post.end)
    }
}

/// A linked document attached to a hack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub url: String,
}

impl Document {
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.url.trim().is_empty()
    }
}

/// A hack event and its three phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hack {
    pub id: Uuid,
    pub name: String,
    pub phases: Phases,
    #[serde(default)]
    pub po: String,
    #[serde(default)]
    pub tech_sheet: String,
    #[serde(default)]
    pub cred_sheet: String,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Hack {
    pub fn new(name: impl Into<String>, phases: Phases) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phases,
            po: String::new(),
            tech_sheet: String::new(),
            cred_sheet: String::new(),
            documents: Vec::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), HackError> {
        if self.name.trim().is_empty() {
            return Err(HackError::MissingName);
        }
        for (kind, range) in self.phases.iter() {
            if !range.is_ordered() {
                return Err(HackError::PhaseEndsBeforeStart(kind));
            }
        }
        Ok(())
    }

    /// Trim free-text fields and tidy the document list the way the form
    /// submits it: blank rows dropped, nameless rows titled "Untitled".
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.po = self.po.trim().to_string();
        self.tech_sheet = self.tech_sheet.trim().to_string();
        self.cred_sheet = self.cred_sheet.trim().to_string();
        self.notes = self.notes.trim().to_string();

        self.documents.retain(|doc| !doc.is_blank());
        for doc in &mut self.documents {
            doc.name = doc.name.trim().to_string();
            doc.url = doc.url.trim().to_string();
            if doc.name.is_empty() {
                doc.name = "Untitled".to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_phases_are_contiguous() {
        let phases = Phases::starting(date(2024, 2, 27));
        assert_eq!(phases.pre, DateRange::new(date(2024, 2, 27), date(2024, 2, 29)));
        assert_eq!(phases.hack, DateRange::new(date(2024, 3, 1), date(2024, 3, 3)));
        assert_eq!(phases.post, DateRange::new(date(2024, 3, 4), date(2024, 3, 8)));
    }

    #[test]
    fn chaining_moves_following_phase() {
        let mut phases = Phases::starting(date(2024, 1, 1));
        phases.pre.end = date(2024, 1, 10);
        phases.chain_after_pre();
        assert_eq!(phases.hack.start, date(2024, 1, 11));
        assert_eq!(phases.hack.end, date(2024, 1, 13));

        phases.hack.end = date(2024, 1, 20);
        phases.chain_after_hack();
        assert_eq!(phases.post.start, date(2024, 1, 21));
        assert_eq!(phases.post.end, date(2024, 1, 25));
    }

    #[test]
    fn chaining_keeps_later_end() {
        let mut phases = Phases::starting(date(2024, 1, 1));
        phases.hack.end = date(2024, 2, 1);
        phases.pre.end = date(2024, 1, 5);
        phases.chain_after_pre();
        assert_eq!(phases.hack, DateRange::new(date(2024, 1, 6), date(2024, 2, 1)));
    }

    #[test]
    fn validation_messages() {
        let mut hack = Hack::new("  ", Phases::starting(date(2024, 5, 1)));
        assert_eq!(hack.validate(), Err(HackError::MissingName));

        hack.name = "Spring".into();
        assert_eq!(hack.validate(), Ok(()));

        hack.phases.hack.end = date(2024, 4, 1);
        let err = hack.validate().unwrap_err();
        assert_eq!(err, HackError::PhaseEndsBeforeStart(PhaseKind::Hack));
        assert_eq!(err.to_string(), "Actual Hack end must be ≥ start.");
    }

    #[test]
    fn normalize_tidies_documents() {
        let mut hack = Hack::new(" Spring ", Phases::starting(date(2024, 5, 1)));
        hack.documents = vec![
            Document { name: "".into(), url: " https://example.com/plan ".into() },
            Document { name: "  ".into(), url: "".into() },
            Document { name: "Brief".into(), url: "".into() },
        ];
        hack.normalize();
        assert_eq!(hack.name, "Spring");
        assert_eq!(
            hack.documents,
            vec![
                Document { name: "Untitled".into(), url: "https://example.com/plan".into() },
                Document { name: "Brief".into(), url: "".into() },
            ]
        );
    }

    #[test]
    fn dates_serialize_as_plain_days() {
        let hack = Hack::new("Spring", Phases::starting(date(2024, 3, 1)));
        let json = serde_json::to_value(&hack).unwrap();
        assert_eq!(json["phases"]["pre"]["start"], "2024-03-01");
        assert_eq!(json["phases"]["post"]["end"], "2024-03-11");
    }
}
