use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visitor classification captured by the profile form. Anything outside
/// this set is treated as unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Student,
    Graduate,
    Professional,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Student, Category::Graduate, Category::Professional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Student => "student",
            Category::Graduate => "graduate",
            Category::Professional => "professional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCategoryError;

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognized visitor category")
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Category::Student),
            "graduate" => Ok(Category::Graduate),
            "professional" => Ok(Category::Professional),
            _ => Err(ParseCategoryError),
        }
    }
}

/// Human-readable audience label for a (possibly unset) category.
pub fn audience_label(category: Option<Category>) -> &'static str {
    match category {
        Some(Category::Student) => "Future Achiever",
        Some(Category::Graduate) => "Rising Graduate",
        Some(Category::Professional) => "Career Changer",
        None => "Explorer",
    }
}

/// Home-page greeting line.
pub fn greeting(name: &str, category: Option<Category>) -> String {
    format!("Welcome, {name}! ({})", audience_label(category))
}

/// One tile in the tailored menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub href: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

/// One card in the recommendation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub meta: &'static str,
    pub href: &'static str,
}

static STUDENT_MENU: [MenuItem; 4] = [
    MenuItem {
        href: "/careers",
        title: "Career Bank",
        text: "Filter by industry and compare paths.",
    },
    MenuItem {
        href: "/quiz",
        title: "Interest Quiz",
        text: "Find your stream in minutes.",
    },
    MenuItem {
        href: "/admissions",
        title: "Admissions & Coaching",
        text: "Stream selection and interview prep.",
    },
    MenuItem {
        href: "/resources",
        title: "Resource Library",
        text: "Articles, eBooks & checklists.",
    },
];

static GRADUATE_MENU: [MenuItem; 4] = [
    MenuItem {
        href: "/quiz",
        title: "Interest Quiz",
        text: "Align your degree with careers.",
    },
    MenuItem {
        href: "/careers",
        title: "Career Bank",
        text: "Skills, salaries, and education paths.",
    },
    MenuItem {
        href: "/resources",
        title: "Resource Library",
        text: "Resume, interview, upskilling.",
    },
    MenuItem {
        href: "/multimedia",
        title: "Multimedia",
        text: "Talks & podcasts from pros.",
    },
];

static PROFESSIONAL_MENU: [MenuItem; 4] = [
    MenuItem {
        href: "/careers",
        title: "Career Bank",
        text: "Explore transitions & salary ranges.",
    },
    MenuItem {
        href: "/resources",
        title: "Resource Library",
        text: "Practical guides & webinars.",
    },
    MenuItem {
        href: "/stories",
        title: "Success Stories",
        text: "Real journeys across domains.",
    },
    MenuItem {
        href: "/multimedia",
        title: "Multimedia",
        text: "Insights from industry voices.",
    },
];

static STUDENT_RECOMMENDATIONS: [Recommendation; 3] = [
    Recommendation {
        title: "Top 10 STEM careers",
        meta: "Article • Library",
        href: "/resources",
    },
    Recommendation {
        title: "How to pick a stream after Grade 10",
        meta: "Guide • Admissions",
        href: "/admissions",
    },
    Recommendation {
        title: "What data analysts actually do",
        meta: "Video • Multimedia",
        href: "/multimedia",
    },
];

static GRADUATE_RECOMMENDATIONS: [Recommendation; 3] = [
    Recommendation {
        title: "Entry roles in product & data",
        meta: "Webinar • Library",
        href: "/resources",
    },
    Recommendation {
        title: "Interview fundamentals",
        meta: "Guide • Admissions",
        href: "/admissions",
    },
    Recommendation {
        title: "From CS degree to SWE",
        meta: "Story • Success",
        href: "/stories",
    },
];

static PROFESSIONAL_RECOMMENDATIONS: [Recommendation; 3] = [
    Recommendation {
        title: "Pivoting careers without a pay cut",
        meta: "Article • Library",
        href: "/resources",
    },
    Recommendation {
        title: "Resume refresh in 30 minutes",
        meta: "Checklist • Library",
        href: "/resources",
    },
    Recommendation {
        title: "Real transitions into tech",
        meta: "Podcast • Multimedia",
        href: "/multimedia",
    },
];

/// The 4 tailored-menu tiles for a category. An unset category falls back
/// to the student set.
pub fn menu_for(category: Option<Category>) -> &'static [MenuItem] {
    match category {
        Some(Category::Graduate) => &GRADUATE_MENU,
        Some(Category::Professional) => &PROFESSIONAL_MENU,
        Some(Category::Student) | None => &STUDENT_MENU,
    }
}

/// The 3 recommendation cards for a category, same fallback policy.
pub fn recommendations_for(category: Option<Category>) -> &'static [Recommendation] {
    match category {
        Some(Category::Graduate) => &GRADUATE_RECOMMENDATIONS,
        Some(Category::Professional) => &PROFESSIONAL_RECOMMENDATIONS,
        Some(Category::Student) | None => &STUDENT_RECOMMENDATIONS,
    }
}

/// A site page served through the shared shell. `file` is the document name
/// the header nav matches against for active-link highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub slug: &'static str,
    pub file: &'static str,
    pub title: &'static str,
    pub blurb: &'static str,
}

pub static PAGES: [Page; 7] = [
    Page {
        slug: "",
        file: "index.html",
        title: "Home",
        blurb: "Your career journey starts here.",
    },
    Page {
        slug: "careers",
        file: "careers.html",
        title: "Career Bank",
        blurb: "Browse careers by industry, skills, and salary.",
    },
    Page {
        slug: "quiz",
        file: "quiz.html",
        title: "Interest Quiz",
        blurb: "A few questions to point you at the right stream.",
    },
    Page {
        slug: "admissions",
        file: "admissions.html",
        title: "Admissions & Coaching",
        blurb: "Stream selection, applications, and interview prep.",
    },
    Page {
        slug: "resources",
        file: "resources.html",
        title: "Resource Library",
        blurb: "Articles, eBooks, checklists, and webinars.",
    },
    Page {
        slug: "multimedia",
        file: "multimedia.html",
        title: "Multimedia",
        blurb: "Talks and podcasts from people in the field.",
    },
    Page {
        slug: "stories",
        file: "stories.html",
        title: "Success Stories",
        blurb: "Real journeys across domains.",
    },
];

pub fn home_page() -> &'static Page {
    &PAGES[0]
}

pub fn page_by_slug(slug: &str) -> Option<&'static Page> {
    PAGES.iter().find(|page| page.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Student".parse::<Category>(), Ok(Category::Student));
        assert_eq!(" GRADUATE ".parse::<Category>(), Ok(Category::Graduate));
        assert!("wizard".parse::<Category>().is_err());
    }

    #[test]
    fn audience_labels_match_the_fixed_mapping() {
        assert_eq!(audience_label(Some(Category::Student)), "Future Achiever");
        assert_eq!(audience_label(Some(Category::Graduate)), "Rising Graduate");
        assert_eq!(
            audience_label(Some(Category::Professional)),
            "Career Changer"
        );
        assert_eq!(audience_label(None), "Explorer");
    }

    #[test]
    fn graduate_menu_has_its_four_items_in_order() {
        let menu = menu_for(Some(Category::Graduate));
        let titles: Vec<_> = menu.iter().map(|item| item.title).collect();
        assert_eq!(
            titles,
            ["Interest Quiz", "Career Bank", "Resource Library", "Multimedia"]
        );
    }

    #[test]
    fn unset_category_falls_back_to_the_student_set() {
        assert_eq!(menu_for(None), menu_for(Some(Category::Student)));
        assert_eq!(
            recommendations_for(None),
            recommendations_for(Some(Category::Student))
        );
    }

    #[test]
    fn every_category_has_three_recommendations() {
        for category in Category::ALL {
            assert_eq!(recommendations_for(Some(category)).len(), 3);
        }
    }

    #[test]
    fn greeting_interpolates_name_and_label() {
        assert_eq!(
            greeting("Maya", Some(Category::Professional)),
            "Welcome, Maya! (Career Changer)"
        );
    }

    #[test]
    fn pages_resolve_by_slug() {
        assert_eq!(page_by_slug("careers").unwrap().file, "careers.html");
        assert!(page_by_slug("nope").is_none());
    }
}
