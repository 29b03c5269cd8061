//! Static catalog of interview scenarios and multi-turn topics.

use serde::{Deserialize, Serialize};

/// Default number of exchanges requested for a multi-turn dialogue.
pub const DEFAULT_MULTI_TURN_TURNS: u32 = 3;

/// What the candidate opens with: a wrong belief or a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stimulus {
    /// Something the candidate believes that is incorrect.
    Misconception(String),
    /// Something the candidate asks.
    Question(String),
}

impl Stimulus {
    /// Text the candidate says.
    pub fn text(&self) -> &str {
        match self {
            Stimulus::Misconception(text) | Stimulus::Question(text) => text,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Stimulus::Misconception(_) => "misconception",
            Stimulus::Question(_) => "question",
        }
    }
}

/// A topic plus the situation that triggers one interview exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub topic: String,
    pub context: String,
    pub stimulus: Stimulus,
}

impl Scenario {
    /// Creates a scenario where the candidate states a misconception.
    pub fn misconception(
        topic: impl Into<String>,
        misconception: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            context: context.into(),
            stimulus: Stimulus::Misconception(misconception.into()),
        }
    }

    /// Creates a scenario where the candidate asks a question.
    pub fn question(
        topic: impl Into<String>,
        question: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            context: context.into(),
            stimulus: Stimulus::Question(question.into()),
        }
    }
}

use Stimulus::{Misconception as M, Question as Q};

/// (topic, stimulus constructor, stimulus text, context)
type Entry = (&'static str, fn(String) -> Stimulus, &'static str, &'static str);

#[rustfmt::skip]
const SCENARIOS: &[Entry] = &[
    // React
    ("React Virtual DOM", M, "React uses the real DOM directly for updates.", "Junior developer explaining React rendering"),
    ("React State Management", Q, "Why can't I just modify state directly?", "Developer trying to update state with state.count++"),
    ("React useEffect", Q, "My useEffect runs infinitely. Why?", "Missing dependency array causing infinite loop"),
    ("React Keys", Q, "Why do I need keys in lists?", "Using index as key in map"),
    // JavaScript fundamentals
    ("Closures", Q, "What's a closure and why should I care?", "Interview question about closure concept"),
    ("Promises vs Callbacks", Q, "What's wrong with callbacks?", "Callback hell in async code"),
    ("Event Loop", Q, "How does JavaScript handle async operations?", "Single-threaded runtime explanation needed"),
    ("Hoisting", M, "Variables are created when the code runs.", "Var hoisting behavior"),
    // TypeScript
    ("TypeScript Benefits", Q, "Why use TypeScript? JavaScript works fine.", "Developer resistant to TypeScript adoption"),
    ("Type Inference", Q, "Do I need to type everything?", "Over-typing simple variables"),
    ("Generics", Q, "What are generics for?", "Writing reusable typed functions"),
    // System design
    ("Database Indexing", Q, "My queries are slow. What should I do?", "No indexes on frequently queried columns"),
    ("Caching Strategy", Q, "When should I use caching?", "API performance optimization"),
    ("Load Balancing", Q, "How do I handle high traffic?", "Single server struggling"),
    // Algorithms
    ("Big O Notation", Q, "What's the difference between O(n) and O(n²)?", "Algorithm complexity analysis"),
    ("Recursion", Q, "When should I use recursion?", "Iterative vs recursive solutions"),
    ("Hash Tables", Q, "Why use a hash map instead of an array?", "Lookup performance optimization"),
    // Code quality
    ("DRY Principle", M, "Copying code is faster than abstracting it.", "Code duplication discussion"),
    ("Testing", Q, "Do I really need to write tests?", "Testing value proposition"),
    ("Code Review", Q, "What should I look for in code reviews?", "Learning to review effectively"),
    // Web performance
    ("Bundle Size", Q, "My app loads slowly. Why?", "Large JavaScript bundle"),
    ("Lazy Loading", Q, "What is lazy loading?", "Optimizing initial page load"),
    // Security
    ("XSS Prevention", Q, "What's XSS?", "Security vulnerability discussion"),
    ("SQL Injection", M, "String concatenation in queries is fine.", "Database security"),
    // Git
    ("Git Merge vs Rebase", Q, "Should I merge or rebase?", "Git workflow best practices"),
    ("Commit Messages", Q, "Why do commit messages matter?", "Code maintainability"),
    // Architecture and misc
    ("REST vs GraphQL", Q, "When should I use GraphQL?", "API design decisions"),
    ("Microservices", Q, "Should I use microservices?", "Architecture decision"),
    ("CSS Specificity", Q, "Why isn't my CSS working?", "Style override issues"),
    ("Memory Leaks", Q, "My app gets slower over time.", "Event listener cleanup"),
    ("Authentication vs Authorization", Q, "What's the difference?", "Security concepts"),
    ("Docker Benefits", Q, "Why containerize?", "Deployment consistency"),
];

/// Topics for multi-turn dialogues, in generation order.
pub const MULTI_TURN_TOPICS: &[&str] = &[
    "Explaining async/await to someone who only knows callbacks",
    "Debugging a React infinite render loop",
    "Optimizing a slow SQL query",
    "Choosing between REST and GraphQL",
    "Understanding JavaScript 'this' keyword",
    "Designing a scalable authentication system",
    "Implementing proper error handling",
    "Understanding CSS Grid vs Flexbox",
    "Writing testable code",
    "Choosing the right data structure",
];

/// Returns the built-in scenarios in generation order.
pub fn scenarios() -> Vec<Scenario> {
    SCENARIOS
        .iter()
        .map(|&(topic, stimulus, text, context)| Scenario {
            topic: topic.to_string(),
            context: context.to_string(),
            stimulus: stimulus(text.to_string()),
        })
        .collect()
}

/// Returns the built-in multi-turn topics as owned strings.
pub fn multi_turn_topics() -> Vec<String> {
    MULTI_TURN_TOPICS.iter().map(|t| t.to_string()).collect()
}
