//! Heading-breadcrumb parsing.
//!
//! Page headings arrive as `>`-separated breadcrumbs like
//! `"Part XII u Allergic Disorders > Chapter 144: Asthma > Page 1186"`.
//! The `u ` token is an OCR artifact of the book's bullet glyph.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*Part\s+[IVXLCDM]+\s*[:\-\u{2013}\u{2014}]?\s*(?:u\s+)?(.+?)\s*$").unwrap()
});
static RE_CHAPTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*Chapter\s+\d+\s*[\u{2014}\-:]*\s*(.*)$").unwrap());
static RE_PAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*Page\s*\d+\s*$").unwrap());

static RE_PREFIX_CHAPTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Chapter\s+\d+:?\s*").unwrap());
static RE_PREFIX_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Part\s+[IVXLCDM]+\b\s*(?:u\s+)?").unwrap());
static RE_PREFIX_PAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Page\s+\d+\s*").unwrap());
static RE_PREFIX_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Section(?:\s+\d+|:)\s*").unwrap());
static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^u\s+").unwrap());
static RE_MULTISPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Rubric headings the book repeats under every condition. A breadcrumb
/// segment equal to one of these is a subtopic, never a topic.
pub const COMMON_SUBTOPICS: &[&str] = &[
    "clinical features",
    "diagnosis",
    "treatment",
    "management",
    "epidemiology",
    "complications",
    "prevention",
    "prognosis",
    "pathogenesis",
    "screening",
    "evaluation",
    "therapy",
];

/// Chapter / section / topic / subtopic extracted from one breadcrumb.
///
/// Absent levels are empty strings; the row assembler applies fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingPath {
    pub chapter: String,
    pub section: String,
    pub topic: String,
    pub subtopic: String,
}

impl HeadingPath {
    /// Parse a breadcrumb string.
    ///
    /// Splits on `>`, drops `Page N` segments, recognizes `Part <roman>`
    /// and `Chapter <n>:` prefixes. A part title becomes the chapter and
    /// the chapter title the section; with no part title the chapter title
    /// is both. Leftover segments fill topic, then subtopic. Empty input
    /// parses to all-empty fields.
    pub fn parse(path: &str) -> Self {
        if path.trim().is_empty() {
            return Self::default();
        }

        let segments: Vec<&str> = path
            .split('>')
            .map(str::trim)
            .filter(|s| !s.is_empty() && !RE_PAGE.is_match(s))
            .collect();

        let mut part_title = String::new();
        let mut chapter_title = String::new();
        let mut rest: Vec<String> = Vec::new();

        for seg in segments {
            if let Some(caps) = RE_PART.captures(seg) {
                part_title = clean_heading(&caps[1]);
                continue;
            }
            if let Some(caps) = RE_CHAPTER.captures(seg) {
                chapter_title = clean_heading(&caps[1]);
                continue;
            }
            let cleaned = clean_heading(seg);
            if !cleaned.is_empty() && cleaned != part_title && cleaned != chapter_title {
                rest.push(cleaned);
            }
        }

        let mut rest = rest.into_iter();

        let chapter = if !part_title.is_empty() {
            part_title.clone()
        } else if !chapter_title.is_empty() {
            chapter_title.clone()
        } else {
            rest.next().unwrap_or_default()
        };

        // With both levels present the chapter line names the section;
        // with one, that one serves as both.
        let section = if !chapter_title.is_empty() {
            chapter_title
        } else if !part_title.is_empty() {
            part_title
        } else {
            rest.next().unwrap_or_default()
        };

        let mut topic = rest.next().unwrap_or_default();
        let mut subtopic = rest.next().unwrap_or_default();

        // A bare rubric segment ("Diagnosis", "Treatment") is a subtopic.
        if subtopic.is_empty() && COMMON_SUBTOPICS.contains(&topic.to_lowercase().as_str()) {
            subtopic = title_case(&topic);
            topic = String::new();
        }

        Self {
            chapter,
            section,
            topic,
            subtopic,
        }
    }
}

/// Sanitize one breadcrumb segment: strip structural prefixes and the OCR
/// bullet, collapse space runs, trim stray punctuation. One-character or
/// all-punctuation residue is treated as empty.
pub fn clean_heading(text: &str) -> String {
    let mut s = text.trim().to_string();
    s = RE_PREFIX_CHAPTER.replace(&s, "").into_owned();
    s = RE_PREFIX_PART.replace(&s, "").into_owned();
    s = RE_PREFIX_PAGE.replace(&s, "").into_owned();
    s = RE_PREFIX_SECTION.replace(&s, "").into_owned();
    s = RE_BULLET.replace(&s, "").into_owned();
    s = RE_MULTISPACE.replace_all(&s, " ").into_owned();
    let s = s
        .trim_matches(|c: char| {
            c == ' ' || c == ':' || c == '-' || c == '>' || c == '\u{bb}' || c == '\u{2013}' || c == '\u{2014}'
        })
        .trim();

    if s.chars().count() <= 1 || s.chars().all(|c| !c.is_alphanumeric()) {
        return String::new();
    }
    s.to_string()
}

static RE_PROPER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[A-Z][a-z]+\s)+(?:[A-Z][a-z]+)").unwrap());

/// Infer a topic when the breadcrumb carried none: first provided keyword
/// that actually occurs in the text, else a run of capitalized words, else
/// the first three words of the chunk.
pub fn infer_topic(text: &str, raw_keywords: &str) -> String {
    let text_lower = text.to_lowercase();

    for keyword in raw_keywords.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        let lower = keyword.to_lowercase();
        if lower.chars().count() > 2
            && !crate::keywords::is_noise_term(&lower)
            && text_lower.contains(&lower)
        {
            return keyword.to_string();
        }
    }

    if let Some(m) = RE_PROPER_RUN.find(text) {
        return m.as_str().trim().to_string();
    }

    text.split_whitespace().take(3).collect::<Vec<_>>().join(" ")
}

/// Rubrics probed (by lead word) when the breadcrumb carried no subtopic.
const SUBTOPIC_CANDIDATES: &[&str] = &[
    "Clinical Features",
    "Diagnosis",
    "Treatment",
    "Management",
    "Epidemiology",
    "Pathophysiology",
    "Complications",
    "Prognosis",
    "Prevention",
];

/// Infer a subtopic rubric from the chunk text. Growth/development/
/// nutrition chapters default to "Assessment" when nothing else matches.
pub fn infer_subtopic(text: &str, chapter: &str) -> String {
    let text_lower = text.to_lowercase();

    for cand in SUBTOPIC_CANDIDATES {
        let lead = cand.split_whitespace().next().unwrap_or_default().to_lowercase();
        if text_lower.contains(&lead) {
            return (*cand).to_string();
        }
    }

    let chapter_lower = chapter.to_lowercase();
    if ["growth", "develop", "nutrition"]
        .iter()
        .any(|k| chapter_lower.contains(k))
    {
        for pref in ["Assessment", "Evaluation", "Management"] {
            if text_lower.contains(&pref.to_lowercase()) {
                return pref.to_string();
            }
        }
        return "Assessment".to_string();
    }

    String::new()
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path() {
        assert_eq!(HeadingPath::parse(""), HeadingPath::default());
        assert_eq!(HeadingPath::parse("   "), HeadingPath::default());
    }

    #[test]
    fn test_chapter_line_without_part_title() {
        // "Part II" alone carries no title, so the chapter line supplies both.
        let parsed = HeadingPath::parse("Part II > Chapter 5: Croup > Page 83");
        assert_eq!(parsed.chapter, "Croup");
        assert_eq!(parsed.section, "Croup");
        assert_eq!(parsed.topic, "");
    }

    #[test]
    fn test_part_title_becomes_chapter() {
        let parsed =
            HeadingPath::parse("Part XII u Allergic Disorders > Chapter 144: Asthma > Page 1186");
        assert_eq!(parsed.chapter, "Allergic Disorders");
        assert_eq!(parsed.section, "Asthma");
    }

    #[test]
    fn test_page_segments_dropped() {
        let parsed = HeadingPath::parse("Chapter 12: Asthma > Page 240");
        assert_eq!(parsed.chapter, "Asthma");
        assert_eq!(parsed.section, "Asthma");
        assert_eq!(parsed.subtopic, "");
    }

    #[test]
    fn test_leftover_segments_fill_topic_and_subtopic() {
        let parsed = HeadingPath::parse(
            "Part I u The Field of Pediatrics > Chapter 1: Overview > Global Health > Child Mortality",
        );
        assert_eq!(parsed.chapter, "The Field of Pediatrics");
        assert_eq!(parsed.section, "Overview");
        assert_eq!(parsed.topic, "Global Health");
        assert_eq!(parsed.subtopic, "Child Mortality");
    }

    #[test]
    fn test_bare_rubric_segment_is_subtopic() {
        let parsed = HeadingPath::parse("Part X u Infections > Chapter 9: Measles > Diagnosis");
        assert_eq!(parsed.topic, "");
        assert_eq!(parsed.subtopic, "Diagnosis");
    }

    #[test]
    fn test_clean_heading() {
        assert_eq!(clean_heading("Chapter 12: Asthma"), "Asthma");
        assert_eq!(clean_heading("u Growth and Development"), "Growth and Development");
        assert_eq!(clean_heading("  Fever --"), "Fever");
        assert_eq!(clean_heading("-"), "");
        assert_eq!(clean_heading("::"), "");
    }

    #[test]
    fn test_infer_topic_prefers_keyword_in_text() {
        let topic = infer_topic(
            "Asthma is diagnosed by spirometry.",
            "university, asthma, xyz",
        );
        assert_eq!(topic, "asthma");
    }

    #[test]
    fn test_infer_topic_falls_back_to_proper_run() {
        let topic = infer_topic("Children with Kawasaki Disease present with fever.", "");
        assert_eq!(topic, "Kawasaki Disease");
    }

    #[test]
    fn test_infer_subtopic() {
        assert_eq!(
            infer_subtopic("The diagnosis rests on spirometry.", "Asthma"),
            "Diagnosis"
        );
        assert_eq!(
            infer_subtopic("Plotting weight on standard charts.", "Growth"),
            "Assessment"
        );
        assert_eq!(infer_subtopic("Nothing relevant here.", "Asthma"), "");
    }
}
