pub mod record;

pub use record::{
    CandidateRecord, ContactItem, EducationEntry, ExperienceEntry, LanguageEntry, ProjectEntry,
    RecordId, SkillEntry, SkillLevel,
};
