use glob::{MatchOptions, Pattern};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use chaincfg_core::{ConfigurationError, LintRuleSet};

const CONTRACT_SOURCES: &str = "src/**/!(*flattened).sol";
const ALL_SOLIDITY: &str = "{src,test,script}/**/*.sol";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// External tools run on staged files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintTool {
    Solhint,
    Prettier,
}

/// One invocation of a formatter or linter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LintStep {
    pub tool: LintTool,
    /// Warnings tolerated before the step fails. `None` means warnings never fail.
    pub max_warnings: Option<u32>,
}

impl LintStep {
    pub fn solhint(max_warnings: u32) -> Self {
        Self {
            tool: LintTool::Solhint,
            max_warnings: Some(max_warnings),
        }
    }

    pub fn prettier() -> Self {
        Self {
            tool: LintTool::Prettier,
            max_warnings: None,
        }
    }

    /// Rewrites files rather than only reporting on them.
    pub fn is_formatter(&self) -> bool {
        self.tool == LintTool::Prettier
    }

    /// Command line passed to the lint runner.
    pub fn command(&self) -> String {
        match (self.tool, self.max_warnings) {
            (LintTool::Solhint, Some(max)) => format!("solhint --max-warnings {max}"),
            (LintTool::Solhint, None) => "solhint".to_string(),
            (LintTool::Prettier, _) => "prettier --write --plugin=prettier-plugin-solidity".to_string(),
        }
    }
}

/// Commands to run, in order, on staged files matching `glob`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintRule {
    pub glob: String,
    pub steps: Vec<LintStep>,
}

impl LintRule {
    pub fn new(glob: impl Into<String>, steps: Vec<LintStep>) -> Self {
        Self {
            glob: glob.into(),
            steps,
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.steps.iter().map(LintStep::command).collect()
    }

    /// The strictest warning threshold among the steps.
    pub fn max_warnings(&self) -> Option<u32> {
        self.steps.iter().filter_map(|s| s.max_warnings).min()
    }

    pub fn matcher(&self) -> Result<GlobMatcher, ConfigurationError> {
        GlobMatcher::new(&self.glob)
    }
}

impl Serialize for LintRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LintRule", 2)?;
        state.serialize_field("glob", &self.glob)?;
        state.serialize_field("commands", &self.commands())?;
        state.end()
    }
}

/// The rules for one of the two lint declarations.
pub fn lint_rules(set: LintRuleSet) -> Vec<LintRule> {
    match set {
        LintRuleSet::LintOnly => vec![
            LintRule::new(CONTRACT_SOURCES, vec![LintStep::solhint(0)]),
            LintRule::new(ALL_SOLIDITY, vec![LintStep::prettier()]),
        ],
        LintRuleSet::FormatThenLint => vec![
            LintRule::new(
                CONTRACT_SOURCES,
                vec![LintStep::prettier(), LintStep::solhint(0)],
            ),
            LintRule::new(ALL_SOLIDITY, vec![LintStep::prettier()]),
        ],
    }
}

/// Compiled staged-file glob.
///
/// Supports `*`, `**`, `{a,b}` alternation and one `!(…)` negated group per
/// alternative, e.g. `src/**/!(*flattened).sol`.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl GlobMatcher {
    pub fn new(glob: &str) -> Result<Self, ConfigurationError> {
        let compile = |pattern: &str| {
            Pattern::new(pattern).map_err(|e| ConfigurationError::InvalidPattern {
                pattern: glob.to_string(),
                message: e.to_string(),
            })
        };

        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for alternative in expand_braces(glob) {
            let (positive, negative) = split_negation(&alternative);
            include.push(compile(&positive)?);
            if let Some(negative) = negative {
                exclude.push(compile(&negative)?);
            }
        }
        Ok(Self { include, exclude })
    }

    pub fn matches(&self, path: &str) -> bool {
        let path = path.replace('\\', "/");
        let path = path.trim_start_matches("./");
        self.include
            .iter()
            .any(|p| p.matches_with(path, MATCH_OPTIONS))
            && !self
                .exclude
                .iter()
                .any(|p| p.matches_with(path, MATCH_OPTIONS))
    }
}

/// Expand `{a,b}` groups into one pattern per alternative.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = pattern[open..].find('}').map(|i| open + i) else {
        return vec![pattern.to_string()];
    };

    let (head, body, tail) = (&pattern[..open], &pattern[open + 1..close], &pattern[close + 1..]);
    body.split(',')
        .flat_map(|alt| expand_braces(&format!("{head}{alt}{tail}")))
        .collect()
}

/// Split `a/!(x).sol` into the include pattern `a/*.sol` and the exclude
/// pattern `a/x.sol`.
fn split_negation(pattern: &str) -> (String, Option<String>) {
    let Some(start) = pattern.find("!(") else {
        return (pattern.to_string(), None);
    };
    let Some(end) = pattern[start..].find(')').map(|i| start + i) else {
        return (pattern.to_string(), None);
    };

    let (head, inner, tail) = (&pattern[..start], &pattern[start + 2..end], &pattern[end + 1..]);
    (format!("{head}*{tail}"), Some(format!("{head}{inner}{tail}")))
}

/// Staged paths a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintTask {
    pub glob: String,
    pub commands: Vec<String>,
    pub paths: Vec<String>,
}

/// Match staged `paths` against `rules`, keeping declaration order and
/// dropping rules that match nothing.
pub fn lint_plan<S: AsRef<str>>(
    rules: &[LintRule],
    paths: &[S],
) -> Result<Vec<LintTask>, ConfigurationError> {
    let mut tasks = Vec::new();
    for rule in rules {
        let matcher = rule.matcher()?;
        let mut matched = Vec::new();
        for path in paths {
            let path: &str = path.as_ref();
            if matcher.matches(path) {
                matched.push(path.to_string());
            }
        }
        if !matched.is_empty() {
            tasks.push(LintTask {
                glob: rule.glob.clone(),
                commands: rule.commands(),
                paths: matched,
            });
        }
    }
    Ok(tasks)
}
