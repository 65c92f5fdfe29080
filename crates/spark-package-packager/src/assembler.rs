//! Release archive assembly.
//!
//! This module turns a package directory into the release zip uploaded to
//! Spark Packages: `<artifact>-<version>.zip` holding the release descriptor
//! `<artifact>-<version>.pom` and the jar `<artifact>-<version>.jar`.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use spark_package_core::pom::{merge_descriptor, Coordinates, Repository};
use spark_package_core::{parse_dependency_file, DependencySpec, PackageName, DEPENDENCY_FILE};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{PackagerError, Result};
use crate::python::collect_python_entries;

/// Name of the readme every package must carry.
pub const README_FILE: &str = "README.md";

/// Accepted license file names, in lookup order.
pub const LICENSE_FILES: [&str; 3] = ["LICENSE", "LICENSE.txt", "LICENSE.md"];

/// Existing descriptor used to seed the release descriptor.
pub const EXISTING_POM_FILE: &str = "pom.xml";

/// Jars whose path contains one of these are never taken as the package jar.
const EXCLUDED_JAR_PATH_PARTS: [&str; 3] = ["lib", "sbt", "assembly"];

const JVM_SOURCE_DIRS: [&str; 2] = ["src/main/scala", "src/main/java"];

/// The result of a successful assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseArtifact {
    /// Absolute path of the release zip.
    pub path: PathBuf,
    /// Maven coordinates written into the descriptor.
    pub coordinates: Coordinates,
}

/// Returns the license file of a package root, if any.
#[must_use]
pub fn find_license_file(root: &Path) -> Option<PathBuf> {
    LICENSE_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Assembles the release zip of a package.
///
/// # Examples
///
/// ```rust,no_run
/// use spark_package_core::PackageName;
/// use spark_package_packager::ReleaseAssembler;
///
/// let name = PackageName::parse("databricks/spark-avro").unwrap();
/// let artifact = ReleaseAssembler::new("spark-avro", name, "1.0.0")
///     .output_dir("dist")
///     .assemble()
///     .unwrap();
///
/// println!("{}", artifact.path.display());
/// ```
#[derive(Debug, Clone)]
pub struct ReleaseAssembler {
    /// Package root directory.
    root: PathBuf,
    /// Package name.
    name: PackageName,
    /// Release version.
    version: String,
    /// Directory the release zip is written to.
    out_dir: PathBuf,
    /// Repository entry added to the descriptor.
    repository: Repository,
}

impl ReleaseAssembler {
    /// Creates an assembler writing to the current directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, name: PackageName, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name,
            version: version.into(),
            out_dir: PathBuf::from("."),
            repository: Repository::spark_packages(),
        }
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Base name shared by the zip, jar and pom: `<artifact>-<version>`.
    #[must_use]
    pub fn artifact_name(&self) -> String {
        self.name.artifact_name(&self.version)
    }

    /// Builds the release zip.
    ///
    /// All inputs are validated before anything is written: required files,
    /// the dependency file, an existing `pom.xml`, and the package jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the readme or license is missing, the dependency
    /// file or existing pom is malformed, the package jar is missing or
    /// ambiguous, or any file cannot be read or written.
    pub fn assemble(&self) -> Result<ReleaseArtifact> {
        info!(
            package = %self.name,
            version = %self.version,
            root = %self.root.display(),
            "Assembling release"
        );

        let license = self.check_required_files()?;
        let coordinates = Coordinates::new(
            self.name.organization(),
            self.name.repository(),
            &self.version,
        );
        let pom = self.build_descriptor(&coordinates)?;
        let existing_jar = self.find_package_jar()?;

        fs::create_dir_all(&self.out_dir).map_err(|e| PackagerError::io(&self.out_dir, e))?;
        let scratch = tempfile::Builder::new()
            .prefix(".spark-package-")
            .tempdir_in(&self.out_dir)
            .map_err(|e| PackagerError::io(&self.out_dir, e))?;

        let artifact_name = self.artifact_name();
        let jar_name = format!("{artifact_name}.jar");
        let pom_name = format!("{artifact_name}.pom");
        let jar_path = scratch.path().join(&jar_name);
        let pom_path = scratch.path().join(&pom_name);

        self.write_jar(&jar_path, &license, existing_jar.as_deref())?;
        fs::write(&pom_path, pom).map_err(|e| PackagerError::io(&pom_path, e))?;

        let zip_path = self.out_dir.join(format!("{artifact_name}.zip"));
        let mut release = ArchiveWriter::create(&zip_path)?;
        release.add_file(&pom_name, &pom_path)?;
        release.add_file(&jar_name, &jar_path)?;
        release.finish()?;

        let path = fs::canonicalize(&zip_path).map_err(|e| PackagerError::io(&zip_path, e))?;
        info!(path = %path.display(), "Release zip created");

        Ok(ReleaseArtifact { path, coordinates })
    }

    fn check_required_files(&self) -> Result<PathBuf> {
        if !self.root.join(README_FILE).is_file() {
            return Err(PackagerError::MissingReadme {
                root: self.root.clone(),
            });
        }
        find_license_file(&self.root).ok_or_else(|| PackagerError::MissingLicense {
            root: self.root.clone(),
        })
    }

    fn build_descriptor(&self, coordinates: &Coordinates) -> Result<String> {
        let dependencies = self.read_dependencies()?;

        let existing_path = self.root.join(EXISTING_POM_FILE);
        let existing = if existing_path.is_file() {
            debug!(path = %existing_path.display(), "Using existing pom");
            let xml = fs::read_to_string(&existing_path)
                .map_err(|e| PackagerError::io(&existing_path, e))?;
            Some(xml)
        } else {
            None
        };

        Ok(merge_descriptor(
            existing.as_deref(),
            coordinates,
            &dependencies,
            &self.repository,
        )?)
    }

    fn read_dependencies(&self) -> Result<Vec<DependencySpec>> {
        let path = self.root.join(DEPENDENCY_FILE);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path).map_err(|e| PackagerError::io(&path, e))?;
        let dependencies = parse_dependency_file(&contents)?;
        debug!(count = dependencies.len(), "Read Spark Package dependencies");
        Ok(dependencies)
    }

    /// Locates the jar built from the package's Java or Scala sources.
    fn find_package_jar(&self) -> Result<Option<PathBuf>> {
        let has_jvm_sources = JVM_SOURCE_DIRS
            .iter()
            .any(|dir| self.root.join(dir).is_dir());
        if !has_jvm_sources {
            return Ok(None);
        }

        // Excluded directories are pruned, so nothing below them is read.
        let root = self.root.as_path();
        let excluded = |path: &Path| {
            let relative = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
            EXCLUDED_JAR_PATH_PARTS
                .iter()
                .any(|part| relative.contains(part))
        };

        let mut candidates = Vec::new();
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !excluded(entry.path()))
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                PackagerError::io(path, e.into())
            })?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "jar")
            {
                candidates.push(entry.into_path());
            }
        }
        candidates.sort();

        match candidates.len() {
            0 => Err(PackagerError::NoJar {
                root: self.root.clone(),
            }),
            1 => {
                let jar = candidates.remove(0);
                debug!(jar = %jar.display(), "Found package jar");
                Ok(Some(jar))
            }
            _ => Err(PackagerError::MultipleJars { candidates }),
        }
    }

    fn write_jar(&self, path: &Path, license: &Path, existing_jar: Option<&Path>) -> Result<()> {
        let mut jar = ArchiveWriter::create(path)?;

        if let Some(existing) = existing_jar {
            jar.copy_entries_from(existing)?;
        }

        let license_name = license
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| LICENSE_FILES[0].to_string());
        jar.add_file(&license_name, license)?;
        jar.add_file(README_FILE, &self.root.join(README_FILE))?;

        let python_dir = self.root.join("python");
        if python_dir.is_dir() {
            for entry in collect_python_entries(&python_dir)? {
                jar.add_file(&entry.archive_name, &entry.source)?;
            }
        }

        jar.finish()
    }
}

/// Zip writer that keeps entry names unique; the first writer of a name wins.
struct ArchiveWriter {
    path: PathBuf,
    writer: ZipWriter<File>,
    names: HashSet<String>,
}

impl ArchiveWriter {
    fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| PackagerError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: ZipWriter::new(file),
            names: HashSet::new(),
        })
    }

    fn claim(&mut self, name: &str) -> bool {
        if self.names.insert(name.to_string()) {
            true
        } else {
            warn!(entry = name, archive = %self.path.display(), "Skipping duplicate archive entry");
            false
        }
    }

    fn add_file(&mut self, name: &str, source: &Path) -> Result<()> {
        if !self.claim(name) {
            return Ok(());
        }
        let contents = fs::read(source).map_err(|e| PackagerError::io(source, e))?;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        debug!(entry = name, archive = %self.path.display(), "Adding archive entry");
        self.writer
            .start_file(name, options)
            .map_err(|e| PackagerError::archive(&self.path, e))?;
        self.writer
            .write_all(&contents)
            .map_err(|e| PackagerError::io(&self.path, e))
    }

    fn copy_entries_from(&mut self, source: &Path) -> Result<()> {
        let file = File::open(source).map_err(|e| PackagerError::io(source, e))?;
        let mut archive = ZipArchive::new(file).map_err(|e| PackagerError::archive(source, e))?;

        for index in 0..archive.len() {
            let entry = archive
                .by_index_raw(index)
                .map_err(|e| PackagerError::archive(source, e))?;
            let name = entry.name().to_string();
            if !self.claim(&name) {
                continue;
            }
            debug!(entry = %name, from = %source.display(), "Copying jar entry");
            self.writer
                .raw_copy_file(entry)
                .map_err(|e| PackagerError::archive(&self.path, e))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.writer
            .finish()
            .map_err(|e| PackagerError::archive(&self.path, e))?;
        Ok(())
    }
}
