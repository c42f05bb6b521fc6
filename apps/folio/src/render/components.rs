//! Component functions: one per resume block, each returning a typed element.

use crate::models::{
    CandidateRecord, ContactItem, EducationEntry, ExperienceEntry, LanguageEntry, ProjectEntry,
    SkillEntry, SkillLevel,
};
use crate::render::node::{el, Element};

/// URI schemes a contact link may use. Anything else renders as plain text.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

pub fn layout(record: &CandidateRecord) -> Element {
    el("div")
        .class("resume-layout")
        .child(sidebar(record))
        .child(main(record))
}

pub fn sidebar(record: &CandidateRecord) -> Element {
    let mut block = el("div")
        .class("resume-sidebar")
        .child(profile(record))
        .child(contact_list(&record.contact))
        .child(skills(&record.skills));

    if let Some(languages) = &record.languages {
        block = block.child(languages_block(languages));
    }
    block
}

pub fn main(record: &CandidateRecord) -> Element {
    let mut block = el("div").class("resume-main");

    if let Some(summary) = &record.summary {
        block = block.child(
            section("summary", "Professional Summary").child(el("p").text(summary.as_str())),
        );
    }

    block = block.child(experience(&record.experience));

    if let Some(education) = &record.education {
        block = block.child(education_block(education));
    }
    if let Some(certifications) = &record.certifications {
        block = block.child(certifications_block(certifications));
    }
    if let Some(projects) = &record.projects {
        block = block.child(projects_block(projects));
    }
    block
}

fn section(key: &'static str, heading: &'static str) -> Element {
    el("div")
        .class("resume-section")
        .attr("data-section", key)
        .child(el("h2").text(heading))
}

fn profile(record: &CandidateRecord) -> Element {
    el("div")
        .class("resume-profile")
        .child(
            el("img")
                .attr("src", record.image.as_str())
                .attr("alt", record.name.as_str()),
        )
        .child(el("h1").text(record.name.as_str()))
        .child(el("div").class("job-title").text(record.title.as_str()))
}

fn contact_list(items: &[ContactItem]) -> Element {
    el("div")
        .class("resume-contact")
        .attr("data-section", "contact")
        .child(el("h2").text("Contact"))
        .children(items.iter().map(contact_item))
}

fn contact_item(item: &ContactItem) -> Element {
    let label = match item.link.as_deref().filter(|link| is_safe_href(link)) {
        Some(link) => el("a").attr("href", link).text(item.text.as_str()),
        None => el("span").text(item.text.as_str()),
    };
    el("div")
        .class("contact-item")
        .child(el("i").class(format!("fa {}", item.icon)))
        .child(label)
}

fn skills(entries: &[SkillEntry]) -> Element {
    section("skills", "Skills").children(entries.iter().map(skill_item))
}

fn skill_item(skill: &SkillEntry) -> Element {
    el("div")
        .class("skill-item")
        .child(el("span").class("skill-name").text(skill.name.as_str()))
        .child(skill_indicator(skill.level))
}

/// Fixed five-slot row; slot `i` is active when `i < level`.
pub fn skill_indicator(level: SkillLevel) -> Element {
    el("div")
        .class("skill-level")
        .children((0..SkillLevel::MAX).map(|i| {
            let class = if i < level.value() {
                "skill-dot active"
            } else {
                "skill-dot"
            };
            el("div").class(class)
        }))
}

fn languages_block(entries: &[LanguageEntry]) -> Element {
    section("languages", "Languages").children(entries.iter().map(|lang| {
        el("div")
            .class("skill-item")
            .child(el("span").class("skill-name").text(lang.name.as_str()))
            .child(el("span").class("language-level").text(lang.level.as_str()))
    }))
}

fn experience(entries: &[ExperienceEntry]) -> Element {
    section("experience", "Experience").children(entries.iter().map(|exp| {
        el("div")
            .class("experience-item")
            .child(el("div").class("experience-date").text(exp.date.as_str()))
            .child(el("h3").text(exp.position.as_str()))
            .child(el("div").class("experience-company").text(exp.company.as_str()))
            .child(
                el("ul").children(
                    exp.responsibilities
                        .iter()
                        .map(|r| el("li").text(r.as_str())),
                ),
            )
    }))
}

fn education_block(entries: &[EducationEntry]) -> Element {
    section("education", "Education").children(entries.iter().map(|edu| {
        let mut item = el("div")
            .class("experience-item")
            .child(el("div").class("experience-date").text(edu.date.as_str()))
            .child(el("h3").text(edu.degree.as_str()))
            .child(el("div").class("experience-company").text(edu.institution.as_str()));
        if let Some(details) = &edu.details {
            item = item.child(el("p").text(details.as_str()));
        }
        item
    }))
}

fn certifications_block(entries: &[String]) -> Element {
    section("certifications", "Certifications")
        .child(el("ul").children(entries.iter().map(|c| el("li").text(c.as_str()))))
}

fn projects_block(entries: &[ProjectEntry]) -> Element {
    section("projects", "Notable Projects").children(entries.iter().map(|project| {
        let mut item = el("div")
            .class("experience-item")
            .child(el("h3").text(project.name.as_str()))
            .child(el("p").text(project.description.as_str()));
        if let Some(tech) = &project.technologies {
            item = item.child(
                el("p")
                    .child(el("strong").text("Technologies:"))
                    .text(format!(" {tech}")),
            );
        }
        item
    }))
}

/// True for relative references and for the allowed absolute schemes.
pub fn is_safe_href(link: &str) -> bool {
    let link = link.trim();
    match link.split_once(':') {
        // A colon after the first '/', '?' or '#' is part of a relative path.
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => ALLOWED_SCHEMES
            .iter()
            .any(|allowed| scheme.eq_ignore_ascii_case(allowed)),
        _ => true,
    }
}
