use itertools::Itertools;
use rand::Rng;

/// Paragraphs offered when no custom prompt is given.
pub const BUILTIN_PARAGRAPHS: [&str; 10] = [
    "The quick brown fox jumps over the lazy dog near the riverbank. Technology continues to evolve at an unprecedented pace, transforming how we live and work.",
    "Programming is both an art and a science that requires creativity and logical thinking. Modern developers use various tools and frameworks to build amazing applications.",
    "Nature provides us with countless wonders, from the depths of the ocean to the peaks of mountains. Every ecosystem plays a vital role in maintaining balance.",
    "Music has the power to evoke emotions and bring people together across cultures. Different genres reflect the diversity of human expression and creativity.",
    "Reading opens doors to new worlds and perspectives we might never otherwise encounter. Books have been humanity's way of preserving knowledge for centuries.",
    "Exercise and proper nutrition are essential components of a healthy lifestyle. Regular physical activity improves both mental and physical wellbeing.",
    "Innovation drives progress and helps solve complex problems facing society today. Creative thinking combined with determination leads to breakthrough solutions.",
    "Traveling broadens our horizons and helps us understand different cultures better. Every journey teaches valuable lessons and creates lasting memories.",
    "Cooking is a delightful blend of science and creativity that brings joy. Experimenting with flavors and techniques can lead to culinary masterpieces.",
    "Learning new skills keeps our minds sharp and opens up opportunities. Continuous growth and adaptation are key to success in any field.",
];

/// Fixed set of candidate paragraphs a session draws its target text from
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    paragraphs: Vec<String>,
}

impl Corpus {
    pub fn builtin() -> Self {
        Self {
            paragraphs: BUILTIN_PARAGRAPHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Build a corpus from user supplied paragraphs.
    ///
    /// Whitespace runs collapse to a single space, since only spaces can be
    /// typed. Blank entries are dropped. If nothing usable remains the builtin
    /// paragraphs are used instead, so a corpus is never empty.
    pub fn new<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paragraphs: Vec<String> = paragraphs
            .into_iter()
            .map(|p| {
                let p: String = p.into();
                p.split_whitespace().join(" ")
            })
            .filter(|p| !p.is_empty())
            .collect();

        if paragraphs.is_empty() {
            tracing::debug!("custom corpus empty, falling back to builtin paragraphs");
            Self::builtin()
        } else {
            Self { paragraphs }
        }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.paragraphs.get(idx).map(String::as_str)
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn contains(&self, paragraph: &str) -> bool {
        self.paragraphs.iter().any(|p| p == paragraph)
    }

    /// Uniformly random index; the same paragraph may come up twice in a row.
    pub fn pick_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.paragraphs.len())
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.paragraphs[self.pick_index(rng)]
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::builtin()
    }
}
