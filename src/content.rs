use serde::Deserialize;

const SITE_JSON: &str = include_str!("../content/site.json");

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SiteContent {
    pub owner: Owner,
    pub nav: Vec<NavLink>,
    pub about: Vec<String>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Owner {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub typed: Vec<String>,
    pub email: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Skill {
    pub name: String,
    pub category: String,
    pub percent: u8,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub details: Vec<String>,
    pub link: Option<String>,
}

impl SiteContent {
    pub fn load() -> Result<Self, serde_json::Error> {
        serde_json::from_str(SITE_JSON)
    }
}
