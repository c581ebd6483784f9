//! Word lists shared by the entity recognizer and the document vectorizer.
//! Entries are lowercase unless noted; lookups ignore ASCII case.

/// Function words dropped from document vectors and from the front of entity spans.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "etc", "every", "few", "for", "from", "further", "had", "has", "have", "having", "he",
    "her", "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "just", "may", "me", "might", "more", "most", "must", "my", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own", "per",
    "please", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "us", "very", "via", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "within", "would", "you", "your", "yours",
];

/// Lowercase connectors allowed inside a multi-word name ("Bank of America", "AT & T").
pub const NAME_CONNECTORS: &[&str] = &["of", "&", "de"];

/// Trailing words that mark a span as an organization name.
pub const ORG_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "co", "company", "llc", "ltd", "limited", "gmbh", "plc",
    "group", "labs", "lab", "technologies", "technology", "systems", "solutions", "software",
    "university", "college", "institute", "foundation", "bank", "partners", "consulting",
    "services", "association", "agency", "academy",
];

/// Single words that are organizations even at the start of a sentence.
pub const KNOWN_ORGS: &[&str] = &[
    "google", "microsoft", "amazon", "apple", "meta", "facebook", "netflix", "oracle", "ibm",
    "intel", "nvidia", "salesforce", "adobe", "cisco", "github", "gitlab", "atlassian", "jira",
    "docker", "kubernetes", "terraform", "ansible", "jenkins", "postgresql", "mysql", "mongodb",
    "redis", "kafka", "spark", "hadoop", "tableau", "excel", "linux", "react", "angular",
    "django", "flask", "tensorflow", "pytorch", "snowflake", "databricks", "azure",
];

/// Technology names recognized in any casing ("python", "aws"). Entries are
/// canonical spellings; words that double as ordinary English ("go", "rust",
/// "spark") are left out.
pub const TECH_TERMS: &[&str] = &[
    "Python", "Java", "JavaScript", "TypeScript", "Kotlin", "Scala", "Golang", "Haskell",
    "Erlang", "Elixir", "Clojure", "Perl", "PHP", "SQL", "NoSQL", "GraphQL", "HTML", "CSS",
    "AWS", "GCP", "Kubernetes", "Docker", "Terraform", "Ansible", "Jenkins", "PostgreSQL",
    "MySQL", "MongoDB", "Redis", "Kafka", "Hadoop", "Elasticsearch", "Linux", "Django",
    "FastAPI", "TensorFlow", "PyTorch", "NumPy", "Databricks", "GitHub", "GitLab", "Node.js",
    "NodeJS", "Webpack", "Kibana", "Grafana", "Prometheus",
];

/// Single-word resume section titles that stand alone on a line.
pub const SECTION_HEADINGS: &[&str] = &[
    "summary", "profile", "objective", "experience", "education", "skills", "projects",
    "certifications", "certificates", "languages", "interests", "hobbies", "references",
    "awards", "achievements", "publications", "contact", "responsibilities", "requirements",
    "qualifications", "overview", "benefits", "about",
];

pub const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec",
];

pub const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Countries, regions and large cities.
pub const PLACES: &[&str] = &[
    "usa", "uk", "america", "canada", "mexico", "brazil", "germany", "france", "spain",
    "italy", "netherlands", "ireland", "india", "china", "japan", "singapore", "australia",
    "europe", "asia", "africa", "london", "paris", "berlin", "dublin", "toronto", "bangalore",
    "tokyo", "sydney", "seattle", "boston", "chicago", "austin", "remote",
];

pub const HONORIFICS: &[&str] = &["mr", "mrs", "ms", "miss", "dr", "prof", "sir"];

pub fn contains(list: &[&str], word: &str) -> bool {
    list.iter().any(|w| w.eq_ignore_ascii_case(word))
}

/// Canonical spelling of a technology name, whatever its casing in `word`.
pub fn tech_term(word: &str) -> Option<&'static str> {
    TECH_TERMS
        .iter()
        .find(|term| term.eq_ignore_ascii_case(word))
        .copied()
}
