use serde::{Deserialize, Serialize};

/// The toggleable repeating sections of the intake form.
///
/// The snake_case wire name doubles as the child collection/table name, so the
/// variants must stay in sync with the persisted layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Membership,
    FdpSttp,
    Courses,
    StudentSupport,
    Industry,
    PublicationsJc,
    BooksChapters,
    PatentsModels,
    SponsoredProjects,
    ConsultancyWork,
}

impl SectionKind {
    /// Canonical order: form order, persisted column order, export order.
    pub const ALL: [SectionKind; 10] = [
        SectionKind::Membership,
        SectionKind::FdpSttp,
        SectionKind::Courses,
        SectionKind::StudentSupport,
        SectionKind::Industry,
        SectionKind::PublicationsJc,
        SectionKind::BooksChapters,
        SectionKind::PatentsModels,
        SectionKind::SponsoredProjects,
        SectionKind::ConsultancyWork,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Membership => "membership",
            SectionKind::FdpSttp => "fdp_sttp",
            SectionKind::Courses => "courses",
            SectionKind::StudentSupport => "student_support",
            SectionKind::Industry => "industry",
            SectionKind::PublicationsJc => "publications_jc",
            SectionKind::BooksChapters => "books_chapters",
            SectionKind::PatentsModels => "patents_models",
            SectionKind::SponsoredProjects => "sponsored_projects",
            SectionKind::ConsultancyWork => "consultancy_work",
        }
    }

    /// Column name of the activation flag in the header record.
    pub fn flag_column(self) -> &'static str {
        match self {
            SectionKind::Membership => "has_membership",
            SectionKind::FdpSttp => "has_fdp",
            SectionKind::Courses => "has_courses",
            SectionKind::StudentSupport => "has_support",
            SectionKind::Industry => "has_industry",
            SectionKind::PublicationsJc => "has_academic",
            SectionKind::BooksChapters => "has_books",
            SectionKind::PatentsModels => "has_patents",
            SectionKind::SponsoredProjects => "has_sponsored",
            SectionKind::ConsultancyWork => "has_consultancy",
        }
    }

    pub fn from_key(key: &str) -> Option<SectionKind> {
        SectionKind::ALL.into_iter().find(|kind| kind.key() == key)
    }
}
