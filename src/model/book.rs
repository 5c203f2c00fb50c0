use uuid::Uuid;

use super::hack::Hack;

/// The in-memory list of hacks, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HackBook {
    hacks: Vec<Hack>,
}

impl HackBook {
    pub fn new(hacks: Vec<Hack>) -> Self {
        Self { hacks }
    }

    pub fn hacks(&self) -> &[Hack] {
        &self.hacks
    }

    pub fn len(&self) -> usize {
        self.hacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hacks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Hack> {
        self.hacks.iter().find(|h| h.id == id)
    }

    pub fn add(&mut self, hack: Hack) {
        self.hacks.push(hack);
    }

    /// Replace the stored hack with the same id, keeping its creation time.
    /// Returns `false` if no such hack exists.
    pub fn update(&mut self, hack: Hack) -> bool {
        match self.hacks.iter_mut().find(|h| h.id == hack.id) {
            Some(slot) => {
                let created_at = slot.created_at;
                *slot = Hack { created_at, ..hack };
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Hack> {
        let idx = self.hacks.iter().position(|h| h.id == id)?;
        Some(self.hacks.remove(idx))
    }

    /// Hacks ordered by the start of their pre-event phase.
    pub fn sorted_by_start(&self) -> Vec<&Hack> {
        let mut sorted: Vec<&Hack> = self.hacks.iter().collect();
        sorted.sort_by_key(|h| h.phases.pre.start);
        sorted
    }

    /// "3 hacks" / "1 hack".
    pub fn count_label(&self) -> String {
        match self.hacks.len() {
            1 => "1 hack".to_string(),
            n => format!("{} hacks", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hack::Phases;
    use chrono::NaiveDate;

    fn hack(name: &str, y: i32, m: u32, d: u32) -> Hack {
        Hack::new(name, Phases::starting(NaiveDate::from_ymd_opt(y, m, d).unwrap()))
    }

    #[test]
    fn add_update_remove() {
        let mut book = HackBook::default();
        let spring = hack("Spring", 2024, 3, 1);
        let id = spring.id;
        let created = spring.created_at;
        book.add(spring);
        assert_eq!(book.len(), 1);

        let mut edited = book.get(id).unwrap().clone();
        edited.name = "Spring Hack".into();
        edited.created_at = chrono::Utc::now() + chrono::Duration::days(1);
        assert!(book.update(edited));
        assert_eq!(book.get(id).unwrap().name, "Spring Hack");
        assert_eq!(book.get(id).unwrap().created_at, created);

        assert!(!book.update(hack("Ghost", 2024, 1, 1)));
        assert_eq!(book.remove(id).map(|h| h.name), Some("Spring Hack".to_string()));
        assert!(book.is_empty());
        assert!(book.remove(id).is_none());
    }

    #[test]
    fn sorted_by_pre_event_start() {
        let book = HackBook::new(vec![
            hack("Autumn", 2024, 9, 1),
            hack("Spring", 2024, 3, 1),
            hack("Summer", 2024, 6, 1),
        ]);
        let names: Vec<_> = book.sorted_by_start().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Spring", "Summer", "Autumn"]);
        assert_eq!(book.count_label(), "3 hacks");
        assert_eq!(HackBook::new(vec![hack("Solo", 2024, 1, 1)]).count_label(), "1 hack");
    }
}
