//! Rule-based fallback responder
//!
//! When no remote session is available (missing credential, construction
//! failure, transport error, empty reply) the assistant answers from a fixed
//! keyword rule table instead. Categories are evaluated in declaration
//! order; the first match wins, and the reply template within the category
//! is chosen uniformly at random.
//!
//! Keywords match on word boundaries (delimited by non-alphanumeric
//! characters or string edges), so "art" does not fire inside "start". This
//! is tighter than the site's original plain substring tests on purpose.

use once_cell::sync::Lazy;
use rand::Rng;

use crate::persona::{FEATURED_PATH, SUBMIT_PATH};

/// One keyword category with its reply templates
#[derive(Debug)]
pub struct FallbackRule {
    /// Stable category name, used for logging and tests
    pub category: &'static str,
    /// Keywords that select this category (matched case-insensitively)
    pub keywords: &'static [&'static str],
    /// Reply templates; one is chosen uniformly at random
    pub responses: &'static [&'static str],
}

/// Replies used when no category matches
static DEFAULT_RESPONSES: &[&str] = &[
    "I'm in standard mode right now, but I can still help! Ask me about submitting your work, our featured creators, or our mission.",
    "Great question! I can tell you about The Creator's Hub, how to join, or who we've featured. What would you like to know?",
    "I'm not sure about that one, but I'd love to help you showcase your talent. Try asking how to submit your work!",
];

/// The rule table, in match-priority order
static RULES: Lazy<Vec<FallbackRule>> = Lazy::new(|| {
    vec![
        FallbackRule {
            category: "greeting",
            keywords: &["hello", "hi", "hey", "namaste", "good morning", "good evening"],
            responses: &[
                "Hello! Welcome to The Creator's Hub. How can I help you today?",
                "Hi there! Ready to showcase your talent? Ask me anything about the Hub.",
                "Hey! Great to see you here. What would you like to know?",
            ],
        },
        FallbackRule {
            category: "submit",
            keywords: &["submit", "join", "upload", "apply", "showcase", "participate"],
            responses: &[
                "You can share your work through our submission form at #/submit. We review every entry!",
                "We'd love to see your work! Head over to #/submit and fill out the Join Us form.",
                "Joining is easy: open #/submit, tell us about yourself, and attach a link to your work.",
            ],
        },
        FallbackRule {
            category: "featured",
            keywords: &["featured", "creators", "artists", "talent", "anusha", "nishikant", "aditi"],
            responses: &[
                "Check out our featured creators at #/featured, like Anusha's Evil Eye artwork, Nishikant's dance, and Aditi's poetry.",
                "We spotlight amazing talent on #/featured. You could be next!",
            ],
        },
        FallbackRule {
            category: "contact",
            keywords: &["contact", "human", "team", "email", "support", "message"],
            responses: &[
                "To reach a human, use the mail icon at the top of this chat window and leave a message. The team will email you back.",
                "The team would love to hear from you! Click the envelope icon above to send them a message directly.",
            ],
        },
        FallbackRule {
            category: "about",
            keywords: &["about", "mission", "vision", "motto", "platform", "hub"],
            responses: &[
                "The Creator's Hub helps underrated creators grow and showcase their talent globally. Together, we rise. Together, we create.",
                "Our mission is to uplift creators across Art, Music, Dance, Writing, Photography and more. Our vision: a global community of recognized talent.",
            ],
        },
        FallbackRule {
            category: "thanks",
            keywords: &["thanks", "thank you", "awesome", "great"],
            responses: &[
                "You're welcome! Keep creating!",
                "Happy to help! Together, we rise.",
            ],
        },
    ]
});

/// Word-boundary containment test
///
/// True when `keyword` occurs in `haystack` delimited by non-alphanumeric
/// characters or the string edges. Both sides are expected to be lower-case
/// already. Multi-word keywords work because the boundary check only looks
/// at the characters adjacent to the matched range.
fn contains_word(haystack: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }

    let mut search_from = 0;
    while let Some(pos) = haystack[search_from..].find(keyword) {
        let start = search_from + pos;
        let end = start + keyword.len();

        let boundary_before = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if boundary_before && boundary_after {
            return true;
        }
        search_from = end;
    }
    false
}

/// Selects a template index given the number of templates in the category
pub type TemplateSelector = Box<dyn Fn(usize) -> usize + Send + Sync>;

/// Keyword-matching responder with injectable template selection
pub struct FallbackResponder {
    selector: TemplateSelector,
}

impl std::fmt::Debug for FallbackResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackResponder").finish_non_exhaustive()
    }
}

impl FallbackResponder {
    /// Responder drawing templates uniformly from ambient randomness
    pub fn new() -> Self {
        Self::with_selector(Box::new(|len| rand::thread_rng().gen_range(0..len)))
    }

    /// Responder with an explicit selector, for deterministic tests
    pub fn with_selector(selector: TemplateSelector) -> Self {
        Self { selector }
    }

    /// Name of the category the input would match, if any
    ///
    /// Deterministic for a given input; randomness only affects which
    /// template inside the category is returned by [`respond`].
    ///
    /// [`respond`]: FallbackResponder::respond
    pub fn category_for(&self, message: &str) -> Option<&'static str> {
        let lowered = message.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| contains_word(&lowered, k)))
            .map(|rule| rule.category)
    }

    /// Produce a canned reply for the given input
    ///
    /// Always returns a non-empty string, including for empty input.
    pub fn respond(&self, message: &str) -> String {
        let lowered = message.to_lowercase();

        let (category, responses) = RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| contains_word(&lowered, k)))
            .map(|rule| (rule.category, rule.responses))
            .unwrap_or(("default", DEFAULT_RESPONSES));

        let index = (self.selector)(responses.len()).min(responses.len() - 1);
        tracing::debug!(category, template = index, "Fallback reply selected");
        responses[index].to_string()
    }
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self::new()
    }
}
