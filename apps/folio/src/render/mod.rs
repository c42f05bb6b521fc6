//! Template renderer: record → fragment.
//!
//! Pure and deterministic. The renderer never looks at viewer state and never
//! performs I/O; the same record always serializes to the same bytes.

pub mod components;
pub mod node;

use crate::models::CandidateRecord;
use node::{el, Element};

/// A rendered, ready-to-mount representation of one record (or of the
/// not-found message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    root: Element,
    not_found: bool,
}

impl Fragment {
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// True for the fixed "Resume not found" fragment.
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn to_html(&self) -> String {
        self.root.to_html()
    }

    /// Section keys (`data-section`) present in the fragment, in document order.
    pub fn sections(&self) -> Vec<&str> {
        self.root
            .descendants()
            .into_iter()
            .filter_map(|e| e.get_attr("data-section"))
            .collect()
    }

    pub fn section(&self, key: &str) -> Option<&Element> {
        self.root.find_by_attr("data-section", key)
    }
}

/// Renders a record into the two-region resume layout.
pub fn render(record: &CandidateRecord) -> Fragment {
    Fragment {
        root: components::layout(record),
        not_found: false,
    }
}

/// The fragment mounted when a lookup misses.
pub fn not_found() -> Fragment {
    Fragment {
        root: el("div").class("resume-error").text("Resume not found"),
        not_found: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactItem, ProjectEntry, SkillEntry, SkillLevel};
    use crate::store::fixtures;

    fn minimal_record() -> CandidateRecord {
        CandidateRecord {
            id: "min".into(),
            name: "Min".to_string(),
            title: "Tester".to_string(),
            image: "images/min.jpeg".to_string(),
            contact: vec![],
            summary: None,
            skills: vec![],
            languages: None,
            experience: vec![],
            education: None,
            certifications: None,
            projects: None,
        }
    }

    fn rendered(id: &str) -> Fragment {
        let content = fixtures::bundled();
        render(content.store.lookup(id).unwrap())
    }

    #[test]
    fn test_minimal_record_renders_only_mandatory_sections() {
        let fragment = render(&minimal_record());
        assert_eq!(
            fragment.sections(),
            vec!["contact", "skills", "experience"]
        );
        assert!(!fragment.to_html().contains("Professional Summary"));
    }

    #[test]
    fn test_sections_follow_optional_fields() {
        let content = fixtures::bundled();
        for record in content.store.iter() {
            let fragment = render(record);
            let sections = fragment.sections();
            let has = |key: &str| sections.contains(&key);
            assert_eq!(has("summary"), record.summary.is_some(), "{}", record.id);
            assert_eq!(has("languages"), record.languages.is_some(), "{}", record.id);
            assert_eq!(has("education"), record.education.is_some(), "{}", record.id);
            assert_eq!(
                has("certifications"),
                record.certifications.is_some(),
                "{}",
                record.id
            );
            assert_eq!(has("projects"), record.projects.is_some(), "{}", record.id);
        }
    }

    #[test]
    fn test_sidebar_then_main_layout() {
        let fragment = rendered("joshua");
        let regions: Vec<&str> = fragment
            .root()
            .child_elements()
            .filter_map(|e| e.get_attr("class"))
            .collect();
        assert_eq!(regions, vec!["resume-sidebar", "resume-main"]);
        assert_eq!(
            fragment.sections(),
            vec![
                "contact",
                "skills",
                "languages",
                "summary",
                "experience",
                "education",
                "projects"
            ]
        );
    }

    #[test]
    fn test_project_blocks_count_and_order() {
        let fragment = rendered("eunice");
        let projects = fragment.section("projects").unwrap();
        let names: Vec<String> = projects
            .find_by_class("experience-item")
            .iter()
            .map(|item| item.child_elements().next().unwrap().text_content())
            .collect();
        assert_eq!(
            names,
            vec!["Real-Time Chat Application", "E-commerce Platform"]
        );
    }

    #[test]
    fn test_certification_items_in_order() {
        let content = fixtures::bundled();
        let record = content.store.lookup("giddy").unwrap();
        let fragment = render(record);
        let items: Vec<String> = fragment
            .section("certifications")
            .unwrap()
            .descendants()
            .into_iter()
            .filter(|e| e.tag() == "li")
            .map(|e| e.text_content())
            .collect();
        assert_eq!(&items, record.certifications.as_ref().unwrap());
    }

    #[test]
    fn test_responsibilities_in_input_order() {
        let content = fixtures::bundled();
        let record = content.store.lookup("joshua").unwrap();
        let fragment = render(record);
        let first_job = fragment.root().find_by_class("experience-item")[0];
        let bullets: Vec<String> = first_job
            .descendants()
            .into_iter()
            .filter(|e| e.tag() == "li")
            .map(|e| e.text_content())
            .collect();
        assert_eq!(bullets, record.experience[0].responsibilities);
    }

    #[test]
    fn test_skill_indicator_active_count_per_level() {
        for level in 0..=SkillLevel::MAX {
            let mut record = minimal_record();
            record.skills = vec![SkillEntry {
                name: "Rust".to_string(),
                level: SkillLevel::try_from(level).unwrap(),
            }];
            let fragment = render(&record);
            let dots = fragment.root().find_by_class("skill-dot");
            let active = dots.iter().filter(|d| d.has_class("active")).count();
            assert_eq!(dots.len(), 5);
            assert_eq!(active, level as usize);
        }
    }

    #[test]
    fn test_contact_link_or_plain_text_in_order() {
        let fragment = rendered("joshua");
        let items = fragment.root().find_by_class("contact-item");
        assert_eq!(items.len(), 4);
        assert_eq!(
            items[0].find_by_attr("href", "tel:+254717340006").map(|a| a.tag()),
            Some("a")
        );
        let last = items[3].child_elements().nth(1).unwrap();
        assert_eq!(last.tag(), "span");
        assert_eq!(last.text_content(), "Kenya");
    }

    #[test]
    fn test_markup_in_fields_is_escaped() {
        let mut record = minimal_record();
        record.name = "Eve <img src=x onerror=alert(1)>".to_string();
        record.contact = vec![ContactItem {
            icon: "fa-user\"><script>".to_string(),
            text: "<b>bold</b>".to_string(),
            link: None,
        }];
        let html = render(&record).to_html();
        assert!(!html.contains("<img src=x"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("Eve &lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_ampersand_in_title_escaped() {
        let html = rendered("benson").to_html();
        assert!(html.contains("AI Expert &amp; Cybersecurity Specialist"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let content = fixtures::bundled();
        for record in content.store.iter() {
            assert_eq!(render(record).to_html(), render(record).to_html());
        }
    }

    #[test]
    fn test_empty_present_list_renders_heading_only() {
        let mut record = minimal_record();
        record.projects = Some(vec![]);
        let fragment = render(&record);
        let projects = fragment.section("projects").unwrap();
        assert!(projects.find_by_class("experience-item").is_empty());
        assert_eq!(projects.text_content(), "Notable Projects");
    }

    #[test]
    fn test_project_technologies_optional() {
        let mut record = minimal_record();
        record.projects = Some(vec![ProjectEntry {
            name: "Bare".to_string(),
            description: "No stack listed".to_string(),
            technologies: None,
        }]);
        let html = render(&record).to_html();
        assert!(!html.contains("Technologies:"));
    }

    #[test]
    fn test_not_found_fragment() {
        let fragment = not_found();
        assert!(fragment.is_not_found());
        assert_eq!(
            fragment.to_html(),
            "<div class=\"resume-error\">Resume not found</div>"
        );
    }
}
