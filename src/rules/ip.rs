//! IP address rule.
//!
//! Validates IPv4/IPv6 addresses in strict canonical form, with optional
//! CIDR suffixes, `!` negation, and an ordered allow/deny range list.
//! Range entries may reference named network aliases which expand
//! recursively at construction time; negating an alias distributes the
//! negation into every member.

use std::any::Any;
use std::borrow::Cow;
use std::net::IpAddr;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::result::ValidationOutcome;
use crate::core::rule::{Rule, RuleHandler, RuleOptions, expect_rule};
use crate::rules::{add_failure, add_incorrect_input, base_params};

/// Alias expansion recursion bound; a chain deeper than this is a cycle.
const MAX_ALIAS_DEPTH: usize = 16;

// ============================================================================
// CIDR BLOCKS
// ============================================================================

/// An address block: an address plus a prefix length.
///
/// A bare address is the full-length block (`/32` or `/128`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IpCidr {
    addr: IpAddr,
    prefix: u8,
}

impl IpCidr {
    fn parse(input: &str) -> Option<Self> {
        let (addr_part, prefix_part) = match input.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (input, None),
        };
        let addr: IpAddr = addr_part.parse().ok()?;
        let max = max_prefix(&addr);
        let prefix = match prefix_part {
            Some(token) => {
                let bits: u8 = token.parse().ok()?;
                (bits <= max).then_some(bits)?
            }
            None => max,
        };
        Some(Self { addr, prefix })
    }

    /// Whether `other` (an address or subnet) falls inside this block.
    ///
    /// A subnet is contained only when it is at least as specific as the
    /// block and shares its network bits.
    fn contains(&self, other: &Self) -> bool {
        if other.prefix < self.prefix {
            return false;
        }
        match (self.addr, other.addr) {
            (IpAddr::V4(this), IpAddr::V4(that)) => {
                let mask = if self.prefix == 0 {
                    0
                } else {
                    u32::MAX << (32 - u32::from(self.prefix))
                };
                (u32::from(this) & mask) == (u32::from(that) & mask)
            }
            (IpAddr::V6(this), IpAddr::V6(that)) => {
                let mask = if self.prefix == 0 {
                    0
                } else {
                    u128::MAX << (128 - u32::from(self.prefix))
                };
                (u128::from(this) & mask) == (u128::from(that) & mask)
            }
            _ => false,
        }
    }
}

fn max_prefix(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

// ============================================================================
// IP RULE
// ============================================================================

/// One expanded range entry: an optionally negated block.
#[derive(Debug, Clone)]
struct RangeEntry {
    negated: bool,
    cidr: IpCidr,
}

/// Validates IP address strings.
///
/// # Examples
///
/// ```rust,ignore
/// use rulekit::rules::Ip;
///
/// // Any syntactically valid IPv4/IPv6 address.
/// let any = Ip::new();
///
/// // First-match-wins allow/deny list with alias expansion.
/// let filtered = Ip::new().with_ranges(["10.0.0.1", "!10.0.0.0/8", "any"])?;
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ip {
    networks: IndexMap<String, Vec<String>>,
    allow_ipv4: bool,
    allow_ipv6: bool,
    allow_subnet: bool,
    require_subnet: bool,
    allow_negation: bool,
    ranges: Vec<String>,
    #[serde(skip)]
    parsed_ranges: Vec<RangeEntry>,
    incorrect_input_message: Cow<'static, str>,
    message: Cow<'static, str>,
    ipv4_not_allowed_message: Cow<'static, str>,
    ipv6_not_allowed_message: Cow<'static, str>,
    wrong_cidr_message: Cow<'static, str>,
    no_subnet_message: Cow<'static, str>,
    has_subnet_message: Cow<'static, str>,
    not_in_range_message: Cow<'static, str>,
    #[serde(flatten)]
    options: RuleOptions,
}

impl Default for Ip {
    fn default() -> Self {
        Self::new()
    }
}

impl Ip {
    /// Creates an IP rule accepting any syntactically valid address.
    #[must_use]
    pub fn new() -> Self {
        Self {
            networks: Self::default_networks(),
            allow_ipv4: true,
            allow_ipv6: true,
            allow_subnet: false,
            require_subnet: false,
            allow_negation: false,
            ranges: Vec::new(),
            parsed_ranges: Vec::new(),
            incorrect_input_message: Cow::Borrowed("{Property} must be a string. {type} given."),
            message: Cow::Borrowed("{Property} must be a valid IP address."),
            ipv4_not_allowed_message: Cow::Borrowed("{Property} must not be an IPv4 address."),
            ipv6_not_allowed_message: Cow::Borrowed("{Property} must not be an IPv6 address."),
            wrong_cidr_message: Cow::Borrowed("{Property} contains wrong subnet mask."),
            no_subnet_message: Cow::Borrowed(
                "{Property} must be an IP address with specified subnet.",
            ),
            has_subnet_message: Cow::Borrowed("{Property} must not be a subnet."),
            not_in_range_message: Cow::Borrowed("{Property} is not in the allowed range."),
            options: RuleOptions::default(),
        }
    }

    /// The built-in network aliases.
    ///
    /// `*` is reserved and always resolves to `any`; `system` is the union
    /// of the multicast, link-local, localhost and documentation blocks.
    #[must_use]
    pub fn default_networks() -> IndexMap<String, Vec<String>> {
        let table: [(&str, &[&str]); 8] = [
            ("*", &["any"]),
            ("any", &["0.0.0.0/0", "::/0"]),
            (
                "private",
                &["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16", "fd00::/8"],
            ),
            ("multicast", &["224.0.0.0/4", "ff00::/8"]),
            ("linklocal", &["169.254.0.0/16", "fe80::/10"]),
            ("localhost", &["127.0.0.0/8", "::1"]),
            (
                "documentation",
                &[
                    "192.0.2.0/24",
                    "198.51.100.0/24",
                    "203.0.113.0/24",
                    "2001:db8::/32",
                ],
            ),
            (
                "system",
                &["multicast", "linklocal", "localhost", "documentation"],
            ),
        ];
        table
            .into_iter()
            .map(|(alias, members)| {
                (
                    alias.to_string(),
                    members.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }

    /// Merges user-defined network aliases over the built-ins.
    ///
    /// Call this before [`with_ranges`](Self::with_ranges), since ranges
    /// expand against the aliases configured at that point.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidArgument`] when the reserved `*` alias is
    /// redefined.
    pub fn with_networks<K, I>(mut self, networks: I) -> Result<Self, RuleError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Vec<String>)>,
    {
        for (alias, members) in networks {
            let alias = alias.into();
            if alias == "*" {
                return Err(RuleError::invalid_argument(
                    "Network alias \"*\" already set as default.",
                ));
            }
            self.networks.insert(alias, members);
        }
        Ok(self)
    }

    /// Sets the ordered allow/deny range list.
    ///
    /// Aliases expand once, deterministically; the stored list contains
    /// only literal entries, preserving order and multiplicity, so
    /// expanding an already-expanded list is a no-op.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidArgument`] on an entry that is neither a known
    /// alias nor a parseable address/CIDR, or on cyclic alias definitions.
    pub fn with_ranges<I, S>(mut self, ranges: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = ranges.into_iter().map(Into::into).collect();
        let expanded = expand_ranges(&self.networks, &raw, 0)?;
        let mut parsed = Vec::with_capacity(expanded.len());
        for entry in &expanded {
            let (negated, body) = split_negation(entry);
            let cidr = IpCidr::parse(body).ok_or_else(|| {
                RuleError::invalid_argument(format!("Invalid IP range \"{entry}\"."))
            })?;
            parsed.push(RangeEntry { negated, cidr });
        }
        self.ranges = expanded;
        self.parsed_ranges = parsed;
        Ok(self)
    }

    /// Toggles IPv4 support.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidArgument`] when this would disable both IP
    /// versions.
    pub fn allow_ipv4(mut self, allow: bool) -> Result<Self, RuleError> {
        if !allow && !self.allow_ipv6 {
            return Err(RuleError::invalid_argument(
                "Both IPv4 and IPv6 checks can not be disabled at the same time.",
            ));
        }
        self.allow_ipv4 = allow;
        Ok(self)
    }

    /// Toggles IPv6 support.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidArgument`] when this would disable both IP
    /// versions.
    pub fn allow_ipv6(mut self, allow: bool) -> Result<Self, RuleError> {
        if !allow && !self.allow_ipv4 {
            return Err(RuleError::invalid_argument(
                "Both IPv4 and IPv6 checks can not be disabled at the same time.",
            ));
        }
        self.allow_ipv6 = allow;
        Ok(self)
    }

    /// Permits a CIDR suffix on the address.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_subnet(mut self, allow: bool) -> Self {
        self.allow_subnet = allow;
        self
    }

    /// Requires a CIDR suffix on the address (implies permitting one).
    #[must_use = "builder methods must be chained or built"]
    pub fn require_subnet(mut self, require: bool) -> Self {
        self.require_subnet = require;
        self
    }

    /// Permits a leading `!` meaning "exclude this address".
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_negation(mut self, allow: bool) -> Self {
        self.allow_negation = allow;
        self
    }

    /// The expanded range list.
    #[must_use]
    pub fn ranges(&self) -> &[String] {
        &self.ranges
    }

    /// The configured network aliases.
    #[must_use]
    pub fn networks(&self) -> &IndexMap<String, Vec<String>> {
        &self.networks
    }

    /// Overrides the incorrect-input message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn incorrect_input_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.incorrect_input_message = template.into();
        self
    }

    /// Overrides the malformed-address message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.message = template.into();
        self
    }

    /// Overrides the IPv4-not-allowed message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn ipv4_not_allowed_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.ipv4_not_allowed_message = template.into();
        self
    }

    /// Overrides the IPv6-not-allowed message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn ipv6_not_allowed_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.ipv6_not_allowed_message = template.into();
        self
    }

    /// Overrides the wrong-CIDR message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn wrong_cidr_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.wrong_cidr_message = template.into();
        self
    }

    /// Overrides the missing-subnet message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn no_subnet_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.no_subnet_message = template.into();
        self
    }

    /// Overrides the unexpected-subnet message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn has_subnet_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.has_subnet_message = template.into();
        self
    }

    /// Overrides the not-in-range message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_in_range_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.not_in_range_message = template.into();
        self
    }
}

crate::impl_rule_options!(Ip);

impl Rule for Ip {
    fn name(&self) -> &'static str {
        "ip"
    }

    fn handler(&self) -> &'static dyn RuleHandler {
        &IpHandler
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// RANGE EXPANSION
// ============================================================================

fn split_negation(entry: &str) -> (bool, &str) {
    match entry.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, entry),
    }
}

fn compose_range(negated: bool, body: &str) -> String {
    if negated {
        format!("!{body}")
    } else {
        body.to_string()
    }
}

/// Substitutes aliases once, in order. Negating an alias distributes the
/// negation into every expanded member; duplicates are kept positionally.
fn expand_ranges(
    networks: &IndexMap<String, Vec<String>>,
    ranges: &[String],
    depth: usize,
) -> Result<Vec<String>, RuleError> {
    if depth > MAX_ALIAS_DEPTH {
        return Err(RuleError::invalid_argument(
            "Network alias nesting is too deep, check the definitions for cycles.",
        ));
    }
    let mut expanded = Vec::new();
    for entry in ranges {
        let (negated, name) = split_negation(entry);
        match networks.get(name) {
            Some(members) => {
                for member in expand_ranges(networks, members, depth + 1)? {
                    let (member_negated, body) = split_negation(&member);
                    expanded.push(compose_range(negated ^ member_negated, body));
                }
            }
            None => expanded.push(entry.clone()),
        }
    }
    Ok(expanded)
}

// ============================================================================
// IP HANDLER
// ============================================================================

/// Stateless evaluator for [`Ip`].
#[derive(Debug)]
pub struct IpHandler;

impl RuleHandler for IpHandler {
    fn validate<'v>(
        &self,
        target: &'v Value,
        rule: &dyn Rule,
        context: &ValidationContext<'v>,
    ) -> Result<ValidationOutcome, RuleError> {
        let rule: &Ip = expect_rule(rule, "ip")?;
        let mut outcome = ValidationOutcome::new();

        let Some(input) = target.as_str() else {
            add_incorrect_input(&mut outcome, context, &rule.incorrect_input_message, target);
            return Ok(outcome);
        };

        let fail = |outcome: &mut ValidationOutcome, template: &str| {
            let params = base_params(context, target);
            add_failure(outcome, context, template, &params);
        };

        let (negated, rest) = split_negation(input);
        if negated && !rule.allow_negation {
            fail(&mut outcome, &rule.message);
            return Ok(outcome);
        }

        let (addr_part, cidr_token) = match rest.split_once('/') {
            None => (rest, None),
            // More than one slash is never a valid address/CIDR pair.
            Some((_, suffix)) if suffix.contains('/') => {
                fail(&mut outcome, &rule.message);
                return Ok(outcome);
            }
            Some((addr, suffix)) => (addr, Some(suffix)),
        };

        let Ok(addr) = addr_part.parse::<IpAddr>() else {
            fail(&mut outcome, &rule.message);
            return Ok(outcome);
        };

        let cidr_bits = match cidr_token {
            None => None,
            Some(token) => match parse_cidr_token(token) {
                Some(bits) => Some(bits),
                None => {
                    fail(&mut outcome, &rule.message);
                    return Ok(outcome);
                }
            },
        };

        let subnet_allowed = rule.allow_subnet || rule.require_subnet;
        if cidr_bits.is_some() && !subnet_allowed {
            fail(&mut outcome, &rule.has_subnet_message);
            return Ok(outcome);
        }
        if cidr_bits.is_none() && rule.require_subnet {
            fail(&mut outcome, &rule.no_subnet_message);
            return Ok(outcome);
        }

        let max = max_prefix(&addr);
        let prefix = match cidr_bits {
            Some(bits) if bits < 0 || bits > i64::from(max) => {
                fail(&mut outcome, &rule.wrong_cidr_message);
                return Ok(outcome);
            }
            Some(bits) => bits as u8,
            None => max,
        };

        if addr.is_ipv4() && !rule.allow_ipv4 {
            fail(&mut outcome, &rule.ipv4_not_allowed_message);
            return Ok(outcome);
        }
        if addr.is_ipv6() && !rule.allow_ipv6 {
            fail(&mut outcome, &rule.ipv6_not_allowed_message);
            return Ok(outcome);
        }

        if !rule.parsed_ranges.is_empty() {
            let probe = IpCidr { addr, prefix };
            // First match wins: a negated match rejects, a plain match
            // accepts, no match rejects.
            let allowed = rule
                .parsed_ranges
                .iter()
                .find_map(|entry| entry.cidr.contains(&probe).then_some(!entry.negated))
                .unwrap_or(false);
            if !allowed {
                fail(&mut outcome, &rule.not_in_range_message);
            }
        }
        Ok(outcome)
    }
}

/// Parses a CIDR suffix token: an optional sign followed by digits only.
/// Out-of-range values are reported as wrong masks, not format errors.
fn parse_cidr_token(token: &str) -> Option<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    token.parse::<i64>().ok()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Validator;
    use crate::rules::Json;
    use crate::rule_set;
    use serde_json::json;

    fn messages_for(rule: Ip, value: &Value) -> Vec<String> {
        let validator = Validator::new();
        let outcome = validator.validate_value(value, &rule_set![rule]).unwrap();
        outcome.messages().into_iter().map(String::from).collect()
    }

    #[test]
    fn plain_addresses_pass() {
        assert!(messages_for(Ip::new(), &json!("192.168.10.11")).is_empty());
        assert!(messages_for(Ip::new(), &json!("2008:fa::1")).is_empty());
        assert!(messages_for(Ip::new(), &json!("2008:00fa::0001")).is_empty());
    }

    #[test]
    fn malformed_addresses_fail_with_generic_message() {
        for input in [
            "1",
            "1.1.1.",
            "1.1.1",
            "not.an.ip",
            "bad:forSure",
            "2008:fz::0",
            "2008:fa::0::1",
            "!2008:fa::0::1",
            "192.168.5.321",
            "01.01.01.01",
            "010.010.010.010",
            "192.168.005.001",
        ] {
            assert_eq!(
                messages_for(Ip::new(), &json!(input)),
                ["Value must be a valid IP address."],
                "for input {input}"
            );
        }
    }

    #[test]
    fn cidr_block_containment() {
        let block = IpCidr::parse("10.0.1.0/24").unwrap();
        assert!(block.contains(&IpCidr::parse("10.0.1.2").unwrap()));
        assert!(block.contains(&IpCidr::parse("10.0.1.28/28").unwrap()));
        // A wider subnet is not contained in a narrower block.
        assert!(!block.contains(&IpCidr::parse("10.0.1.1/22").unwrap()));
        assert!(!block.contains(&IpCidr::parse("10.0.2.1").unwrap()));
        // Version mismatch never matches.
        assert!(!block.contains(&IpCidr::parse("::1").unwrap()));
    }

    #[test]
    fn zero_prefix_contains_everything_of_same_version() {
        let any4 = IpCidr::parse("0.0.0.0/0").unwrap();
        assert!(any4.contains(&IpCidr::parse("8.8.8.8").unwrap()));
        let any6 = IpCidr::parse("::/0").unwrap();
        assert!(any6.contains(&IpCidr::parse("cafe::babe").unwrap()));
    }

    #[test]
    fn handler_rejects_foreign_rule_kinds() {
        let validator = Validator::new();
        let data = json!("10.0.0.1");
        let context = ValidationContext::new(&validator, &data);
        let error = IpHandler
            .validate(&data, &Json::new(), &context)
            .unwrap_err();
        assert!(matches!(
            error,
            RuleError::UnexpectedRule {
                expected: "ip",
                actual: "json"
            }
        ));
    }

    #[test]
    fn alias_cycles_are_rejected() {
        let result = Ip::new()
            .with_networks([
                ("a".to_string(), vec!["b".to_string()]),
                ("b".to_string(), vec!["a".to_string()]),
            ])
            .unwrap()
            .with_ranges(["a"]);
        assert!(result.unwrap_err().to_string().contains("too deep"));
    }

    #[test]
    fn unparseable_range_entries_are_rejected() {
        let error = Ip::new().with_ranges(["not-a-range"]).unwrap_err();
        assert!(error.to_string().contains("Invalid IP range"));
    }
}
