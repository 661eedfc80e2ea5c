use std::fmt;
use std::sync::LazyLock;
use regex::{NoExpand, Regex};
use crate::utils::bump::{parse_part, VersionTriple};
use crate::utils::config::{DEFAULT_PADDING, DEFAULT_PREFIX};
use crate::utils::errors::{ConfigError, Result, VersionError};
use crate::utils::newline;

/// Placeholder rendered by [`read_version`] for a component that was not found.
pub const MISSING_PLACEHOLDER: &str = "null";

// The default prefix is regex-escaped and padding is non-zero, so this cannot fail.
static DEFAULT_CODEC: LazyLock<VersionCodec> = LazyLock::new(|| {
    VersionCodec::new(VersionLayout::default()).expect("default version patterns are valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Major,
    Minor,
    Patch,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::Major, Component::Minor, Component::Patch];

    pub fn name(&self) -> &'static str {
        match self {
            Component::Major => "MAJOR",
            Component::Minor => "MINOR",
            Component::Patch => "PATCH",
        }
    }

    fn index(&self) -> usize {
        match self {
            Component::Major => 0,
            Component::Minor => 1,
            Component::Patch => 2,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the version variables are spelled in the build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLayout {
    pub prefix: String,
    pub padding: usize,
}

impl Default for VersionLayout {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            padding: DEFAULT_PADDING,
        }
    }
}

impl VersionLayout {
    pub fn variable(&self, component: Component) -> String {
        format!("{}{}", self.prefix, component.name())
    }

    fn pattern(&self, component: Component) -> Result<Regex> {
        let source = format!(
            r#"set\({}\s+"(\d+)"\)"#,
            regex::escape(&self.variable(component))
        );
        Ok(Regex::new(&source)?)
    }

    fn assignment(&self, component: Component, value: &str) -> String {
        format!(
            "set({}{}\"{}\")",
            self.variable(component),
            " ".repeat(self.padding),
            value
        )
    }
}

/// Raw component values found by [`VersionCodec::scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentScan {
    prefix: String,
    values: [Option<String>; 3],
}

impl ComponentScan {
    pub fn get(&self, component: Component) -> Option<&str> {
        self.values[component.index()].as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    pub fn missing(&self) -> Vec<Component> {
        Component::ALL
            .into_iter()
            .filter(|c| self.get(*c).is_none())
            .collect()
    }

    /// Renders `major.minor.patch`, writing `null` for any missing component.
    pub fn to_version_string(&self) -> String {
        let part = |c: Component| self.get(c).unwrap_or(MISSING_PLACEHOLDER);
        format!(
            "{}.{}.{}",
            part(Component::Major),
            part(Component::Minor),
            part(Component::Patch)
        )
    }

    pub fn to_triple(&self) -> std::result::Result<VersionTriple, VersionError> {
        let mut parsed = [0u64; 3];
        for component in Component::ALL {
            let variable = format!("{}{}", self.prefix, component.name());
            let value = self
                .get(component)
                .ok_or_else(|| VersionError::MissingComponent(variable.clone()))?;
            parsed[component.index()] = parse_part(&variable, value)?;
        }
        Ok(VersionTriple::new(parsed[0], parsed[1], parsed[2]))
    }
}

#[derive(Debug, Clone)]
pub struct VersionCodec {
    layout: VersionLayout,
    patterns: [Regex; 3],
}

impl Default for VersionCodec {
    fn default() -> Self {
        DEFAULT_CODEC.clone()
    }
}

impl VersionCodec {
    /// Compiles the patterns for `layout`.
    ///
    /// Zero padding is rejected: the written assignment would no longer match
    /// the `\s+` the patterns require, so the file could not be read back.
    pub fn new(layout: VersionLayout) -> Result<Self> {
        if layout.padding == 0 {
            return Err(ConfigError::InvalidValue {
                field: "padding".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        let patterns = [
            layout.pattern(Component::Major)?,
            layout.pattern(Component::Minor)?,
            layout.pattern(Component::Patch)?,
        ];
        Ok(Self { layout, patterns })
    }

    pub fn layout(&self) -> &VersionLayout {
        &self.layout
    }

    /// Finds the first value of each component, testing every still-unset
    /// component against each line.
    pub fn scan(&self, contents: &str) -> ComponentScan {
        let mut values: [Option<String>; 3] = [None, None, None];

        for (line_num, line) in split_lines(contents).enumerate() {
            for component in Component::ALL {
                let slot = &mut values[component.index()];
                if slot.is_some() {
                    continue;
                }
                if let Some(caps) = self.patterns[component.index()].captures(line) {
                    let value = caps[1].to_string();
                    log::debug!(
                        "Found {} = {} at line {}",
                        self.layout.variable(component),
                        value,
                        line_num + 1
                    );
                    *slot = Some(value);
                }
            }
            if values.iter().all(Option::is_some) {
                break;
            }
        }

        ComponentScan {
            prefix: self.layout.prefix.clone(),
            values,
        }
    }

    /// Reads the version as `major.minor.patch`.
    ///
    /// Every missing variable is reported through `log::error!` and shows up
    /// as `null` in the returned string.
    pub fn read(&self, contents: &str) -> String {
        let scan = self.scan(contents);
        for component in scan.missing() {
            log::error!(
                "Could not find {} variable in build file",
                self.layout.variable(component)
            );
        }
        scan.to_version_string()
    }

    /// Rewrites the three version assignments with the parts of `version`.
    ///
    /// Parts are taken as given; a part that is not supplied is written as an
    /// empty value. All other lines are kept and the original line ending is
    /// used when joining.
    pub fn write(&self, contents: &str, version: &str) -> String {
        let mut parts = version.split('.');
        let replacements: Vec<String> = Component::ALL
            .into_iter()
            .map(|c| self.layout.assignment(c, parts.next().unwrap_or("")))
            .collect();

        let lines: Vec<String> = split_lines(contents)
            .map(|line| {
                let mut rewritten = line.to_string();
                for component in Component::ALL {
                    let idx = component.index();
                    rewritten = self.patterns[idx]
                        .replace(&rewritten, NoExpand(&replacements[idx]))
                        .into_owned();
                }
                if rewritten != line {
                    log::debug!("Rewrote '{}' as '{}'", line, rewritten);
                }
                rewritten
            })
            .collect();

        lines.join(newline::detect_or_default(contents).as_str())
    }
}

/// Splits on `\r?\n`, keeping a trailing partial line.
fn split_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

pub fn read_version(contents: &str) -> String {
    DEFAULT_CODEC.read(contents)
}

pub fn write_version(contents: &str, version: &str) -> String {
    DEFAULT_CODEC.write(contents, version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    const SAMPLE: &str = "# header\n\
set(META_VERSION_MAJOR       \"0\")\n\
set(META_VERSION_MINOR       \"9\")\n\
set(META_VERSION_PATCH       \"1\")\n\
# footer\n";

    #[test]
    fn reads_sample_version() {
        assert_eq!(read_version(SAMPLE), "0.9.1");
    }

    #[test]
    fn writes_sample_version() {
        let expected = "# header\n\
set(META_VERSION_MAJOR       \"1\")\n\
set(META_VERSION_MINOR       \"0\")\n\
set(META_VERSION_PATCH       \"0\")\n\
# footer\n";
        assert_eq!(write_version(SAMPLE, "1.0.0"), expected);
    }

    #[test]
    fn write_then_read_round_trips() {
        let updated = write_version(SAMPLE, "4.5.6");
        assert_eq!(read_version(&updated), "4.5.6");
    }

    #[test]
    fn whitespace_width_is_not_significant_on_read() {
        let contents = "set(META_VERSION_PATCH \"3\")\n\
set(META_VERSION_MAJOR\t\"1\")\n\
set(META_VERSION_MINOR                    \"2\")";
        assert_eq!(read_version(contents), "1.2.3");
    }

    #[test]
    fn write_normalizes_padding() {
        let contents = "set(META_VERSION_MAJOR \"1\")\nset(META_VERSION_MINOR \"2\")\nset(META_VERSION_PATCH \"3\")";
        assert_eq!(
            write_version(contents, "1.2.4"),
            "set(META_VERSION_MAJOR       \"1\")\n\
set(META_VERSION_MINOR       \"2\")\n\
set(META_VERSION_PATCH       \"4\")"
        );
    }

    #[test]
    fn first_match_wins() {
        let contents = "set(META_VERSION_MAJOR \"1\")\n\
set(META_VERSION_MAJOR \"7\")\n\
set(META_VERSION_MINOR \"2\")\n\
set(META_VERSION_PATCH \"3\")\n";
        assert_eq!(read_version(contents), "1.2.3");
    }

    #[test]
    fn every_unset_component_is_tested_on_each_line() {
        let contents = "set(META_VERSION_MAJOR \"1\") set(META_VERSION_MINOR \"2\") set(META_VERSION_PATCH \"3\")";
        assert_eq!(read_version(contents), "1.2.3");
    }

    #[test]
    fn missing_components_become_null() {
        let contents = "set(META_VERSION_MAJOR \"1\")\nset(META_VERSION_PATCH \"3\")\n";
        assert_eq!(read_version(contents), "1.null.3");
        assert_eq!(read_version(""), "null.null.null");
    }

    #[test]
    fn scan_reports_missing_components() {
        let codec = VersionCodec::default();
        let scan = codec.scan("set(META_VERSION_MINOR \"2\")");
        assert!(!scan.is_complete());
        assert_eq!(scan.missing(), vec![Component::Major, Component::Patch]);
        assert_eq!(scan.get(Component::Minor), Some("2"));
        assert_eq!(
            scan.to_triple(),
            Err(VersionError::MissingComponent("META_VERSION_MAJOR".to_string()))
        );
    }

    #[test]
    fn scan_converts_to_triple() {
        let scan = VersionCodec::default().scan(SAMPLE);
        assert_eq!(scan.to_triple(), Ok(VersionTriple::new(0, 9, 1)));
    }

    #[test]
    fn preserves_crlf_line_endings() {
        let contents = SAMPLE.replace('\n', "\r\n");
        let updated = write_version(&contents, "2.0.0");
        assert_eq!(updated.matches("\r\n").count(), 5);
        assert_eq!(updated.matches('\n').count(), 5);
        assert!(updated.starts_with("# header\r\nset(META_VERSION_MAJOR       \"2\")\r\n"));
        assert_eq!(read_version(&updated), "2.0.0");
    }

    #[test]
    fn unrelated_lines_are_untouched() {
        let contents = "project(demo VERSION 9.9.9)\n\
set(META_VERSION_MAJOR \"1\")\n\
set(OTHER_VERSION_MINOR \"5\")\n\
set(META_VERSION_MINOR \"2\")\n\
# set(META_VERSION_PATCH 3) unquoted\n\
set(META_VERSION_PATCH \"3\")";
        let updated = write_version(contents, "7.8.9");
        let lines: Vec<&str> = updated.split('\n').collect();
        assert_eq!(lines[0], "project(demo VERSION 9.9.9)");
        assert_eq!(lines[2], "set(OTHER_VERSION_MINOR \"5\")");
        assert_eq!(lines[4], "# set(META_VERSION_PATCH 3) unquoted");
        assert_eq!(lines[5], "set(META_VERSION_PATCH       \"9\")");
    }

    #[test]
    fn text_around_the_assignment_is_kept() {
        let contents = "  set(META_VERSION_MAJOR \"1\") # bumped by CI";
        assert_eq!(
            write_version(contents, "2.0.0"),
            "  set(META_VERSION_MAJOR       \"2\") # bumped by CI"
        );
    }

    #[test]
    fn mixed_line_endings_are_joined_with_the_majority() {
        let contents = "set(META_VERSION_MAJOR \"1\")\r\n\
set(META_VERSION_MINOR \"2\")\n\
set(META_VERSION_PATCH \"3\")\r\n\
# end";
        let updated = write_version(contents, "1.2.4");
        assert_eq!(
            updated,
            "set(META_VERSION_MAJOR       \"1\")\r\n\
set(META_VERSION_MINOR       \"2\")\r\n\
set(META_VERSION_PATCH       \"4\")\r\n\
# end"
        );
    }

    #[test]
    fn extra_version_parts_are_ignored() {
        let updated = write_version(SAMPLE, "4.5.6.7");
        assert_eq!(read_version(&updated), "4.5.6");
        assert!(!updated.contains('7'));
    }

    #[test]
    fn zero_padding_layout_is_rejected() {
        let result = VersionCodec::new(VersionLayout {
            prefix: DEFAULT_PREFIX.to_string(),
            padding: 0,
        });
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidValue { ref field, .. })) if field == "padding"
        ));
    }

    #[test]
    fn short_version_writes_empty_values() {
        let updated = write_version(SAMPLE, "3");
        assert!(updated.contains("set(META_VERSION_MAJOR       \"3\")"));
        assert!(updated.contains("set(META_VERSION_MINOR       \"\")"));
        assert!(updated.contains("set(META_VERSION_PATCH       \"\")"));
    }

    #[test]
    fn replacement_values_are_literal() {
        let updated = write_version(SAMPLE, "$1.${0}.3");
        assert!(updated.contains("set(META_VERSION_MAJOR       \"$1\")"));
        assert!(updated.contains("set(META_VERSION_MINOR       \"${0}\")"));
    }

    #[test]
    fn custom_layout_uses_its_prefix_and_padding() {
        let codec = VersionCodec::new(VersionLayout {
            prefix: "APP.VERSION_".to_string(),
            padding: 1,
        })
        .unwrap();
        let contents = "set(APP.VERSION_MAJOR \"1\")\nset(APPXVERSION_MINOR \"9\")\nset(APP.VERSION_MINOR \"2\")\nset(APP.VERSION_PATCH \"3\")";
        assert_eq!(codec.read(contents), "1.2.3");
        let updated = codec.write(contents, "1.2.4");
        assert!(updated.ends_with("set(APP.VERSION_PATCH \"4\")"));
        assert!(updated.contains("set(APPXVERSION_MINOR \"9\")"));
    }
}
