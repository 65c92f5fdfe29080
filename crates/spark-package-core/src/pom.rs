//! Release descriptor (Maven POM) generation and merging.
//!
//! A release ships a `<artifactId>-<version>.pom` next to its jar. When the
//! package already carries a `pom.xml`, that document is used as the starting
//! point: the coordinates are overwritten, Spark Package dependencies and the
//! Spark Packages repository are added when missing, and everything else is
//! preserved.
//!
//! # Example
//!
//! ```rust
//! use spark_package_core::pom::{merge_descriptor, Coordinates, Repository};
//! use spark_package_core::DependencySpec;
//!
//! let coordinates = Coordinates::new("databricks", "spark-avro", "1.0.0");
//! let deps = [DependencySpec::new("graphframes", "graphframes", "0.1.0")];
//! let xml = merge_descriptor(None, &coordinates, &deps, &Repository::spark_packages()).unwrap();
//!
//! assert!(xml.contains("<artifactId>spark-avro</artifactId>"));
//! assert!(xml.contains("<id>SparkPackagesRepo</id>"));
//! ```

use std::fmt;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;

use crate::dependency::DependencySpec;
use crate::error::{Error, Result};

/// Maven POM namespace URI.
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// XML Schema instance namespace URI.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Schema location written on freshly created descriptors.
pub const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";

const ROOT_TAG: &str = "project";
const INDENT_SIZE: usize = 2;

/// Namespace applied to the element names of a descriptor.
///
/// Every element created by the merger is named through [`PomNamespace::qualify`]
/// so that it matches the convention of the document it is added to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PomNamespace {
    /// The document declares no namespace.
    Unqualified,
    /// The document uses a default namespace (`xmlns="..."`); names carry no prefix.
    Default(String),
    /// The document binds its namespace to a prefix (`xmlns:p="..."`).
    Prefixed {
        /// Prefix used on every element name.
        prefix: String,
        /// Namespace URI bound to the prefix.
        uri: String,
    },
}

impl PomNamespace {
    /// Builds the qualified element name for a local name.
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_package_core::pom::PomNamespace;
    ///
    /// let ns = PomNamespace::Prefixed { prefix: "pom".into(), uri: "urn:x".into() };
    /// assert_eq!(ns.qualify("version"), "pom:version");
    /// assert_eq!(PomNamespace::Unqualified.qualify("version"), "version");
    /// ```
    #[must_use]
    pub fn qualify(&self, local: &str) -> String {
        match self {
            Self::Unqualified | Self::Default(_) => local.to_string(),
            Self::Prefixed { prefix, .. } => format!("{prefix}:{local}"),
        }
    }

    /// Returns the namespace URI, if one is declared.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Unqualified => None,
            Self::Default(uri) | Self::Prefixed { uri, .. } => Some(uri),
        }
    }

    fn detect(root: &Element) -> Result<Self> {
        let (prefix, local) = match root.name.split_once(':') {
            Some((prefix, local)) => (Some(prefix), local),
            None => (None, root.name.as_str()),
        };

        if !local.contains(ROOT_TAG) {
            return Err(Error::PomRoot {
                tag: root.name.clone(),
            });
        }

        match prefix {
            Some(prefix) => {
                let uri = root
                    .attribute(&format!("xmlns:{prefix}"))
                    .ok_or_else(|| Error::PomParse {
                        reason: format!("namespace prefix '{prefix}' is not declared"),
                    })?;
                Ok(Self::Prefixed {
                    prefix: prefix.to_string(),
                    uri: uri.to_string(),
                })
            }
            None => Ok(root
                .attribute("xmlns")
                .map_or(Self::Unqualified, |uri| Self::Default(uri.to_string()))),
        }
    }
}

/// Maven coordinates of the package being released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    /// Maven `groupId` (the GitHub organization).
    pub group_id: String,
    /// Maven `artifactId` (the GitHub repository).
    pub artifact_id: String,
    /// Release version.
    pub version: String,
}

impl Coordinates {
    /// Creates coordinates from their parts.
    #[must_use]
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }
}

/// A `<repository>` entry of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Repository id.
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// Repository URL; entries are de-duplicated on this field.
    pub url: String,
    /// Repository layout.
    pub layout: String,
}

impl Repository {
    /// The Maven repository Spark Packages are resolved from.
    #[must_use]
    pub fn spark_packages() -> Self {
        Self {
            id: "SparkPackagesRepo".to_string(),
            name: "Spark Packages Repository".to_string(),
            url: "http://dl.bintray.com/spark-packages/maven/".to_string(),
            layout: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(Element),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    fn with_text(name: impl Into<String>, text: &str) -> Self {
        let mut element = Self::new(name);
        element.text = Some(text.to_string());
        element
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut element = Self::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
        for attribute in start.attributes() {
            let attribute = attribute.map_err(parse_error)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value().map_err(parse_error)?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Comment(_) => None,
        })
    }

    fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.name == name)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|child| child.text.as_deref())
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    fn push_element(&mut self, element: Self) {
        self.children.push(Node::Element(element));
    }

    /// Inserts before the element currently at `position` (counting elements
    /// only), or appends when there are not that many elements.
    fn insert_element(&mut self, position: usize, element: Self) {
        let index = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, node)| matches!(node, Node::Element(_)))
            .nth(position)
            .map(|(index, _)| index);

        match index {
            Some(index) => self.children.insert(index, Node::Element(element)),
            None => self.children.push(Node::Element(element)),
        }
    }
}

/// An in-memory release descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomDocument {
    root: Element,
    namespace: PomNamespace,
}

impl Default for PomDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PomDocument {
    /// Creates an empty descriptor carrying the standard Maven namespace,
    /// schema instance and schema location attributes.
    #[must_use]
    pub fn new() -> Self {
        let mut root = Element::new(ROOT_TAG);
        root.attributes = vec![
            ("xmlns".to_string(), POM_NAMESPACE.to_string()),
            ("xmlns:xsi".to_string(), XSI_NAMESPACE.to_string()),
            (
                "xsi:schemaLocation".to_string(),
                POM_SCHEMA_LOCATION.to_string(),
            ),
        ];

        Self {
            root,
            namespace: PomNamespace::Default(POM_NAMESPACE.to_string()),
        }
    }

    /// Parses an existing descriptor.
    ///
    /// Whitespace between elements is discarded; comments are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PomParse`] for malformed XML and [`Error::PomRoot`]
    /// when the root element is not a `project`.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|e| Error::PomParse {
                reason: format!("{e} (at byte {})", reader.buffer_position()),
            })?;

            match event {
                Event::Start(start) => stack.push(Element::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Element::from_start(&start)?;
                    close_element(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| Error::PomParse {
                        reason: "unexpected closing tag".to_string(),
                    })?;
                    close_element(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.append_text(&text.unescape().map_err(parse_error)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.append_text(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Comment(comment) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .children
                            .push(Node::Comment(String::from_utf8_lossy(&comment).into_owned()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::PomParse {
                reason: "unexpected end of document".to_string(),
            });
        }

        let root = root.ok_or_else(|| Error::PomParse {
            reason: "document has no root element".to_string(),
        })?;
        let namespace = PomNamespace::detect(&root)?;

        Ok(Self { root, namespace })
    }

    /// Returns the namespace convention of the document.
    #[must_use]
    pub const fn namespace(&self) -> &PomNamespace {
        &self.namespace
    }

    /// Returns the text of a top-level element.
    #[must_use]
    pub fn text(&self, local: &str) -> Option<&str> {
        self.root.child_text(&self.namespace.qualify(local))
    }

    /// Sets the text of a top-level element.
    ///
    /// An existing element keeps its place and only has its text replaced.
    /// A missing one is inserted at `position` (counting elements only), or
    /// appended when the document is shorter or no position is given.
    pub fn set_text(&mut self, local: &str, text: &str, position: Option<usize>) {
        let name = self.namespace.qualify(local);
        if let Some(child) = self.root.child_mut(&name) {
            child.text = Some(text.to_string());
            return;
        }

        let child = Element::with_text(name, text);
        match position {
            Some(position) => self.root.insert_element(position, child),
            None => self.root.push_element(child),
        }
    }

    /// Writes `groupId`, `artifactId` and `version`.
    pub fn set_coordinates(&mut self, coordinates: &Coordinates) {
        self.set_text("groupId", &coordinates.group_id, Some(1));
        self.set_text("artifactId", &coordinates.artifact_id, Some(2));
        self.set_text("version", &coordinates.version, Some(3));
    }

    /// Adds a dependency unless one with the same `groupId` and `artifactId`
    /// is already declared. Returns whether it was added.
    pub fn add_dependency(&mut self, dependency: &DependencySpec) -> bool {
        self.add_keyed_entry(
            "dependencies",
            "dependency",
            &[
                ("groupId", &dependency.group_id),
                ("artifactId", &dependency.artifact_id),
                ("version", &dependency.version),
            ],
            &["groupId", "artifactId"],
        )
    }

    /// Adds a repository unless one with the same `url` is already declared.
    /// Returns whether it was added.
    pub fn add_repository(&mut self, repository: &Repository) -> bool {
        self.add_keyed_entry(
            "repositories",
            "repository",
            &[
                ("id", &repository.id),
                ("name", &repository.name),
                ("url", &repository.url),
                ("layout", &repository.layout),
            ],
            &["url"],
        )
    }

    /// Returns the declared dependencies, in document order.
    #[must_use]
    pub fn dependencies(&self) -> Vec<DependencySpec> {
        let field = |entry: &Element, local: &str| {
            entry
                .child_text(&self.namespace.qualify(local))
                .unwrap_or_default()
                .to_string()
        };

        self.entries("dependencies", "dependency")
            .map(|entry| {
                DependencySpec::new(
                    field(entry, "groupId"),
                    field(entry, "artifactId"),
                    field(entry, "version"),
                )
            })
            .collect()
    }

    /// Returns the URLs of the declared repositories, in document order.
    #[must_use]
    pub fn repository_urls(&self) -> Vec<String> {
        let url = self.namespace.qualify("url");
        self.entries("repositories", "repository")
            .filter_map(|entry| entry.child_text(&url).map(ToString::to_string))
            .collect()
    }

    /// Serializes the document with a UTF-8 declaration and two-space
    /// indentation, without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PomWrite`] if serialization fails.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
        write_element(&mut writer, &self.root)?;

        let xml = String::from_utf8(writer.into_inner()).map_err(write_error)?;
        Ok(xml.trim_end_matches('\n').to_string())
    }

    fn entries<'a>(
        &'a self,
        collection: &str,
        entry: &str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        let entry = self.namespace.qualify(entry);
        self.root
            .child(&self.namespace.qualify(collection))
            .into_iter()
            .flat_map(|parent| parent.elements())
            .filter(move |element| element.name == entry)
    }

    fn add_keyed_entry(
        &mut self,
        collection: &str,
        entry: &str,
        fields: &[(&str, &str)],
        keys: &[&str],
    ) -> bool {
        let mut new_entry = Element::new(self.namespace.qualify(entry));
        for (field, value) in fields {
            new_entry.push_element(Element::with_text(self.namespace.qualify(field), value));
        }
        let keys: Vec<String> = keys.iter().map(|key| self.namespace.qualify(key)).collect();

        let collection = self.namespace.qualify(collection);
        if let Some(parent) = self.root.child_mut(&collection) {
            let exists = parent
                .elements()
                .filter(|existing| existing.name == new_entry.name)
                .any(|existing| {
                    keys.iter()
                        .all(|key| existing.child_text(key) == new_entry.child_text(key))
                });
            if exists {
                return false;
            }
            parent.push_element(new_entry);
        } else {
            let mut parent = Element::new(collection);
            parent.push_element(new_entry);
            self.root.push_element(parent);
        }
        true
    }
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_element(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::PomParse {
            reason: "document has more than one root element".to_string(),
        });
    }
    *root = Some(element);
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.text.is_none() && element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    if let Some(text) = &element.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error)?;
    }
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Comment(comment) => writer
                .write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))
                .map_err(write_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_error)
}

fn parse_error(err: impl fmt::Display) -> Error {
    Error::PomParse {
        reason: err.to_string(),
    }
}

fn write_error(err: impl fmt::Display) -> Error {
    Error::PomWrite {
        reason: err.to_string(),
    }
}

/// Produces the release descriptor.
///
/// Starts from `existing` when given (otherwise from an empty descriptor),
/// overwrites the coordinates, adds every dependency whose
/// `(groupId, artifactId)` is not yet declared, adds `repository` unless its
/// URL is already listed, and serializes the result.
///
/// # Errors
///
/// Returns an error if `existing` cannot be parsed or the result cannot be
/// serialized.
pub fn merge_descriptor(
    existing: Option<&str>,
    coordinates: &Coordinates,
    dependencies: &[DependencySpec],
    repository: &Repository,
) -> Result<String> {
    let mut pom = existing
        .map(PomDocument::parse)
        .transpose()?
        .unwrap_or_default();

    pom.set_coordinates(coordinates);
    for dependency in dependencies {
        if !pom.add_dependency(dependency) {
            debug!(%dependency, "dependency already declared in pom");
        }
    }
    if !pom.add_repository(repository) {
        debug!(url = %repository.url, "repository already declared in pom");
    }

    pom.to_xml()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXISTING_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0
         http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <groupId>org.test</groupId>
    <artifactId>zip-test</artifactId>
    <version>0.1</version>
</project>"#;

    fn coordinates() -> Coordinates {
        Coordinates::new("test", "pkg", "1.0")
    }

    #[test]
    fn test_new_document_layout() {
        let xml = merge_descriptor(None, &coordinates(), &[], &Repository::spark_packages())
            .unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"xmlns="http://maven.apache.org/POM/4.0.0""#));
        assert!(xml.contains(r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#));
        assert!(xml.contains("xsi:schemaLocation="));
        assert!(xml.contains(
            "  <groupId>test</groupId>\n  <artifactId>pkg</artifactId>\n  <version>1.0</version>"
        ));
        assert!(xml.contains("<id>SparkPackagesRepo</id>"));
        assert!(xml.contains("<url>http://dl.bintray.com/spark-packages/maven/</url>"));
        assert!(xml.ends_with("</project>"));
        assert_eq!(PomDocument::default(), PomDocument::new());
    }

    #[test]
    fn test_existing_document_overwrites_coordinates() {
        let xml = merge_descriptor(
            Some(EXISTING_POM),
            &coordinates(),
            &[],
            &Repository::spark_packages(),
        )
        .unwrap();
        let pom = PomDocument::parse(&xml).unwrap();

        assert_eq!(pom.text("modelVersion"), Some("4.0.0"));
        assert_eq!(pom.text("groupId"), Some("test"));
        assert_eq!(pom.text("artifactId"), Some("pkg"));
        assert_eq!(pom.text("version"), Some("1.0"));
        assert!(!xml.contains("org.test"));
        assert_eq!(pom.namespace(), &PomNamespace::Default(POM_NAMESPACE.to_string()));
    }

    #[test]
    fn test_missing_coordinates_inserted_at_fixed_positions() {
        let mut pom =
            PomDocument::parse("<project><modelVersion>4.0.0</modelVersion><name>n</name></project>")
                .unwrap();
        pom.set_coordinates(&coordinates());

        let names: Vec<&str> = pom.root.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["modelVersion", "groupId", "artifactId", "version", "name"]
        );
        assert_eq!(pom.namespace(), &PomNamespace::Unqualified);
    }

    #[test]
    fn test_prefixed_namespace_applies_to_new_elements() {
        let existing = r#"<pom:project xmlns:pom="http://maven.apache.org/POM/4.0.0"><pom:modelVersion>4.0.0</pom:modelVersion></pom:project>"#;
        let xml = merge_descriptor(
            Some(existing),
            &coordinates(),
            &[DependencySpec::new("right", "format", "3")],
            &Repository::spark_packages(),
        )
        .unwrap();

        assert!(xml.contains("<pom:groupId>test</pom:groupId>"));
        assert!(xml.contains("<pom:dependencies>"));
        assert!(xml.contains("<pom:dependency>"));
        assert!(xml.contains("<pom:repositories>"));
        assert!(!xml.contains("<groupId>"));

        let pom = PomDocument::parse(&xml).unwrap();
        assert_eq!(pom.namespace().uri(), Some(POM_NAMESPACE));
        assert_eq!(pom.dependencies(), vec![DependencySpec::new("right", "format", "3")]);
    }

    #[test]
    fn test_undeclared_prefix_is_rejected() {
        let err = PomDocument::parse("<pom:project></pom:project>").unwrap_err();
        assert!(matches!(err, Error::PomParse { .. }));
    }

    #[test]
    fn test_root_must_be_project() {
        let err = PomDocument::parse("<settings><a>1</a></settings>").unwrap_err();
        assert_eq!(
            err,
            Error::PomRoot {
                tag: "settings".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_document() {
        let err = PomDocument::parse("<project><groupId>x</artifactId></project>").unwrap_err();
        assert!(matches!(err, Error::PomParse { .. }));
        assert!(PomDocument::parse("").is_err());
    }

    #[test]
    fn test_duplicate_dependency_keeps_first_version() {
        let mut pom = PomDocument::new();
        assert!(pom.add_dependency(&DependencySpec::new("a", "b", "1")));
        assert!(!pom.add_dependency(&DependencySpec::new("a", "b", "2")));
        assert!(pom.add_dependency(&DependencySpec::new("a", "c", "1")));

        assert_eq!(
            pom.dependencies(),
            vec![
                DependencySpec::new("a", "b", "1"),
                DependencySpec::new("a", "c", "1"),
            ]
        );
    }

    #[test]
    fn test_existing_repository_not_duplicated() {
        let existing = r"<project>
            <repositories>
                <repository>
                    <id>custom-id</id>
                    <url>http://dl.bintray.com/spark-packages/maven/</url>
                </repository>
            </repositories>
        </project>";
        let xml = merge_descriptor(
            Some(existing),
            &coordinates(),
            &[],
            &Repository::spark_packages(),
        )
        .unwrap();

        assert_eq!(xml.matches("<repository>").count(), 1);
        assert!(xml.contains("<id>custom-id</id>"));
    }

    #[test]
    fn test_comments_and_unrelated_content_preserved() {
        let existing = "<project><!-- keep me --><build><plugins/></build></project>";
        let xml = merge_descriptor(
            Some(existing),
            &coordinates(),
            &[],
            &Repository::spark_packages(),
        )
        .unwrap();

        assert!(xml.contains("<!-- keep me -->"));
        assert!(xml.contains("<plugins/>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut pom = PomDocument::new();
        pom.set_text("description", "a < b & c", None);
        let xml = pom.to_xml().unwrap();
        assert!(xml.contains("<description>a &lt; b &amp; c</description>"));

        let reparsed = PomDocument::parse(&xml).unwrap();
        assert_eq!(reparsed.text("description"), Some("a < b & c"));
    }
}
