//! Route table: resolves (method, path) to a command and its path variables.

use std::borrow::Cow;

use wd_protocol::{COMMANDS, CommandInfo, HttpMethod, LocatorParams};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

#[derive(Debug, Clone)]
struct Route {
    command: &'static str,
    template: &'static str,
    segments: Vec<Segment>,
    /// Literal segments before the first variable.
    literal_prefix: usize,
    literal_count: usize,
}

impl Route {
    fn parse(info: &CommandInfo) -> Self {
        let segments: Vec<Segment> = info
            .resource_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => Segment::Variable(name.to_string()),
                None => Segment::Literal(s.to_ascii_lowercase()),
            })
            .collect();
        let literal_prefix =
            segments.iter().take_while(|s| matches!(s, Segment::Literal(_))).count();
        let literal_count = segments.iter().filter(|s| matches!(s, Segment::Literal(_))).count();
        Self {
            command: info.name,
            template: info.resource_path,
            segments,
            literal_prefix,
            literal_count,
        }
    }

    fn bind(&self, parts: &[&str]) -> Option<LocatorParams> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut variables = LocatorParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if !literal.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                Segment::Variable(name) => {
                    let value = urlencoding::decode(part).unwrap_or(Cow::Borrowed(*part));
                    variables.insert(name.clone(), value.into_owned());
                }
            }
        }
        Some(variables)
    }
}

/// Result of a successful route match.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub command: &'static str,
    /// Path variables, percent-decoded.
    pub variables: LocatorParams,
    /// Request path relative to the base path, starting with `/`.
    pub relative_path: String,
}

/// Immutable route table, one list of routes per HTTP method.
///
/// Routes in each list are kept in precedence order: longest literal
/// prefix first, then most literal segments, then declaration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    base_path: String,
    get: Vec<Route>,
    post: Vec<Route>,
    delete: Vec<Route>,
}

impl RouteTable {
    /// Build the table for every command of the wire protocol.
    pub fn new(base_path: &str) -> Self {
        Self::from_commands(base_path, COMMANDS)
    }

    pub fn from_commands(base_path: &str, commands: &[CommandInfo]) -> Self {
        let mut table = Self {
            base_path: normalize_base_path(base_path),
            get: Vec::new(),
            post: Vec::new(),
            delete: Vec::new(),
        };
        for info in commands {
            table.routes_mut(info.method).push(Route::parse(info));
        }
        for routes in [&mut table.get, &mut table.post, &mut table.delete] {
            // Stable sort keeps declaration order among equals.
            routes.sort_by(|a, b| {
                b.literal_prefix
                    .cmp(&a.literal_prefix)
                    .then(b.literal_count.cmp(&a.literal_count))
            });
        }
        table
    }

    fn routes(&self, method: HttpMethod) -> &[Route] {
        match method {
            HttpMethod::Get => &self.get,
            HttpMethod::Post => &self.post,
            HttpMethod::Delete => &self.delete,
        }
    }

    fn routes_mut(&mut self, method: HttpMethod) -> &mut Vec<Route> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
        }
    }

    /// The base path, with a leading and trailing slash.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Strip the base path from `path`. Paths outside it yield `None`.
    pub fn relative_path(&self, path: &str) -> Option<String> {
        let base = self.base_path.trim_end_matches('/');
        if path.len() < base.len() || !path.is_char_boundary(base.len()) {
            return None;
        }
        let (head, rest) = path.split_at(base.len());
        if !head.eq_ignore_ascii_case(base) {
            return None;
        }
        if rest.is_empty() {
            return Some("/".to_string());
        }
        rest.starts_with('/').then(|| rest.to_string())
    }

    /// Resolve a request to a command. Unknown methods and unmatched paths yield `None`.
    pub fn match_route(&self, method: &str, path: &str) -> Option<RouteMatch> {
        let method = HttpMethod::parse(method)?;
        let relative_path = self.relative_path(path)?;
        let parts: Vec<&str> = relative_path.split('/').filter(|s| !s.is_empty()).collect();
        self.routes(method).iter().find_map(|route| {
            route.bind(&parts).map(|variables| RouteMatch {
                command: route.command,
                variables,
                relative_path: relative_path.clone(),
            })
        })
    }

    /// Every route as (method, command, template).
    pub fn entries(&self) -> impl Iterator<Item = (HttpMethod, &'static str, &'static str)> + '_ {
        [HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]
            .into_iter()
            .flat_map(move |method| self.routes(method).iter().map(move |r| (method, r.command, r.template)))
    }

    pub fn len(&self) -> usize {
        self.get.len() + self.post.len() + self.delete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() { "/".to_string() } else { format!("/{trimmed}/") }
}
