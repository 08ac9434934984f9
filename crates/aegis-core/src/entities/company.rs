//! Company profile and team members.

use chrono::Datelike;
use serde::Serialize;

use super::Tracked;
use crate::schema::{Bounds, Checked, Entity, Length, Reader, Violations};
use crate::types::FundingStage;
use crate::ValidationError;

/// Earliest accepted founding year.
pub const MIN_FOUNDED_YEAR: i64 = 1900;

/// A person on the company's team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    name: String,
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    years_experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_companies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expertise: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_founder: Option<bool>,
}

impl Entity for TeamMember {
    const NAME: &'static str = "TeamMember";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "role",
        "background",
        "linkedin_url",
        "years_experience",
        "education",
        "previous_companies",
        "expertise",
        "is_founder",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let name = r.string("name", Length::between(1, 100));
        let role = r.string("role", Length::between(1, 100));
        let background = r.opt_string("background", Length::any());
        let linkedin_url = r.opt_url("linkedin_url");
        let years_experience = r.opt_integer("years_experience", Bounds::between(0, 50));
        let education = r.opt_string("education", Length::any());
        let previous_companies = r.opt_strings("previous_companies");
        let expertise = r.opt_strings("expertise");
        let is_founder = r.opt_bool("is_founder");

        Ok(Self {
            name: name?,
            role: role?,
            background: background?,
            linkedin_url: linkedin_url?,
            years_experience: years_experience?,
            education: education?,
            previous_companies: previous_companies?,
            expertise: expertise?,
            is_founder: is_founder?,
        })
    }
}

impl TeamMember {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn linkedin_url(&self) -> Option<&str> {
        self.linkedin_url.as_deref()
    }

    pub fn years_experience(&self) -> Option<u32> {
        self.years_experience
    }

    pub fn education(&self) -> Option<&str> {
        self.education.as_deref()
    }

    pub fn previous_companies(&self) -> Option<&[String]> {
        self.previous_companies.as_deref()
    }

    pub fn expertise(&self) -> Option<&[String]> {
        self.expertise.as_deref()
    }

    pub fn is_founder(&self) -> Option<bool> {
        self.is_founder
    }
}

/// Public profiles of a company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crunchbase: Option<String>,
}

impl Entity for SocialLinks {
    const NAME: &'static str = "SocialLinks";
    const FIELDS: &'static [&'static str] = &["linkedin", "twitter", "crunchbase"];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let linkedin = r.opt_url("linkedin");
        let twitter = r.opt_url("twitter");
        let crunchbase = r.opt_url("crunchbase");

        Ok(Self {
            linkedin: linkedin?,
            twitter: twitter?,
            crunchbase: crunchbase?,
        })
    }
}

impl SocialLinks {
    pub fn linkedin(&self) -> Option<&str> {
        self.linkedin.as_deref()
    }

    pub fn twitter(&self) -> Option<&str> {
        self.twitter.as_deref()
    }

    pub fn crunchbase(&self) -> Option<&str> {
        self.crunchbase.as_deref()
    }
}

/// A startup being evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyProfile {
    #[serde(flatten)]
    tracked: Tracked,
    name: String,
    one_liner: String,
    sector: String,
    stage: FundingStage,
    founded_year: i32,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    social_links: Option<SocialLinks>,
}

impl Entity for CompanyProfile {
    const NAME: &'static str = "CompanyProfile";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "name",
        "one_liner",
        "sector",
        "stage",
        "founded_year",
        "location",
        "website",
        "description",
        "logo_url",
        "social_links",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let current_year = i64::from(r.now().year());

        let tracked = Tracked::read(r);
        let name = r.string("name", Length::between(1, 200));
        let one_liner = r.string("one_liner", Length::between(10, 500));
        let sector = r.string("sector", Length::between(1, 100));
        let stage = r.choice("stage");
        let founded_year = r.integer("founded_year", Bounds::between(MIN_FOUNDED_YEAR, current_year));
        let location = r.string("location", Length::between(1, 200));
        let website = r.opt_url("website");
        let description = r.opt_string("description", Length::at_most(2000));
        let logo_url = r.opt_url("logo_url");
        let social_links = r.opt_entity("social_links");

        Ok(Self {
            tracked: tracked?,
            name: name?,
            one_liner: one_liner?,
            sector: sector?,
            stage: stage?,
            founded_year: founded_year?,
            location: location?,
            website: website?,
            description: description?,
            logo_url: logo_url?,
            social_links: social_links?,
        })
    }

    fn failure(violations: Violations) -> ValidationError {
        ValidationError::CompanyProfile(violations)
    }
}

impl CompanyProfile {
    pub fn tracked(&self) -> &Tracked {
        &self.tracked
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn one_liner(&self) -> &str {
        &self.one_liner
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn stage(&self) -> FundingStage {
        self.stage
    }

    pub fn founded_year(&self) -> i32 {
        self.founded_year
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }

    pub fn social_links(&self) -> Option<&SocialLinks> {
        self.social_links.as_ref()
    }
}
