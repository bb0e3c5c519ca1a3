//! Discovered module / package descriptors.

use std::{
    fmt,
    path::{Component, Path, PathBuf},
};

use serde::Serialize;

/// A discovered importable unit: a package directory or a module file.
#[derive(Clone, PartialEq, Eq)]
pub struct FoundModule
{
    /// Absolute, resolved path to the module file or package directory
    pub path: PathBuf,

    /// Path relative to the search directory
    pub rel_path: PathBuf,

    /// The search directory exactly as the caller supplied it. Not
    /// normalized: `../src` and its absolute form are kept distinct.
    pub search_dir: PathBuf,
}

/// What kind of thing a `FoundModule` points at on disk right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind
{
    Package,
    Module,
    Missing,
}

impl fmt::Display for ModuleKind
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        match self
        {
            ModuleKind::Package => write!(f, "package"),
            ModuleKind::Module => write!(f, "module"),
            ModuleKind::Missing => write!(f, "missing"),
        }
    }
}

impl FoundModule
{
    pub fn new(
        path: impl Into<PathBuf>,
        rel_path: impl Into<PathBuf>,
        search_dir: impl Into<PathBuf>,
    ) -> Self
    {
        Self { path: path.into(), rel_path: rel_path.into(), search_dir: search_dir.into() }
    }

    /// Dotted import name: relative path minus its extension.
    pub fn name(&self) -> String
    {
        let stem = self
            .rel_path
            .with_extension("");

        stem.components()
            .filter_map(|c| match c
            {
                Component::Normal(s) => Some(s.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn is_package_dir(&self) -> bool
    {
        self.path
            .is_dir()
    }

    pub fn is_module_file(&self) -> bool
    {
        self.path
            .is_file()
    }

    pub fn kind(&self) -> ModuleKind
    {
        if self.is_package_dir()
        {
            ModuleKind::Package
        }
        else if self.is_module_file()
        {
            ModuleKind::Module
        }
        else
        {
            ModuleKind::Missing
        }
    }

    /// `search_dir` joined with `rel_path`, keeping the caller's form.
    pub fn search_path(&self) -> String
    {
        self.search_dir
            .join(&self.rel_path)
            .to_string_lossy()
            .into_owned()
    }

    /// True when `other.path` is a strict filesystem ancestor of `self.path`.
    pub fn is_descendant_of(
        &self,
        other: &FoundModule,
    ) -> bool
    {
        is_strict_descendant(&self.path, &other.path)
    }

    /// Does `other` stand for the same importable module as `self`?
    ///
    /// True for equal paths (`pkg/__init__.py` and `pkg/__init__.pyi` both
    /// resolve to `pkg`) and for same-stem module files such as `mod.py`
    /// beside its `mod.pyi` stub.
    pub fn is_same_module(
        &self,
        other: &FoundModule,
    ) -> bool
    {
        if self.path == other.path
        {
            return true;
        }

        self.path
            .with_extension("")
            == other
                .path
                .with_extension("")
            && self.is_module_file()
            && other.is_module_file()
    }

    /// Either the same module as `other` or nested inside it.
    pub fn is_covered_by(
        &self,
        other: &FoundModule,
    ) -> bool
    {
        self.is_same_module(other) || self.is_descendant_of(other)
    }

    /// Serializable snapshot for JSON and table output.
    pub fn record(&self) -> ModuleRecord
    {
        ModuleRecord {
            name: self.name(),
            kind: self.kind(),
            path: self
                .path
                .to_string_lossy()
                .into_owned(),
            rel_path: self
                .rel_path
                .to_string_lossy()
                .into_owned(),
            search_dir: self
                .search_dir
                .to_string_lossy()
                .into_owned(),
            search_path: self.search_path(),
        }
    }
}

/// Component-wise strict ancestry check.
pub fn is_strict_descendant(
    path: &Path,
    ancestor: &Path,
) -> bool
{
    path != ancestor && path.starts_with(ancestor)
}

impl fmt::Debug for FoundModule
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        writeln!(f, "FoundModule(")?;
        writeln!(f, "    name            = {:?}", self.name())?;
        writeln!(f, "    path            = {:?}", self.path)?;
        writeln!(f, "    rel_path        = {:?}", self.rel_path)?;
        writeln!(f, "    search_dir      = {:?}", self.search_dir)?;
        writeln!(f, "    search_path     = {:?}", self.search_path())?;
        writeln!(f, "    is_package_dir  = {:?}", self.is_package_dir())?;
        writeln!(f, "    is_module_file  = {:?}", self.is_module_file())?;
        write!(f, ")")
    }
}

/// Flat, serializable view of a `FoundModule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, tabled::Tabled)]
pub struct ModuleRecord
{
    pub name: String,
    pub kind: ModuleKind,
    pub path: String,
    pub rel_path: String,
    pub search_dir: String,
    pub search_path: String,
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_name_strips_extension()
    {
        let m = FoundModule::new("/src/pkg/mod.py", "pkg/mod.py", "src");
        assert_eq!(m.name(), "pkg.mod");

        let m = FoundModule::new("/src/ns/sub", "ns/sub", "src");
        assert_eq!(m.name(), "ns.sub");

        let m = FoundModule::new("/src/top.py", "top.py", "src");
        assert_eq!(m.name(), "top");
    }

    #[test]
    fn test_search_path_keeps_caller_form()
    {
        let m = FoundModule::new("/abs/src/pkg", "pkg", "../src");
        assert_eq!(m.search_path(), Path::new("../src").join("pkg").to_string_lossy());
        assert_eq!(m.search_dir, PathBuf::from("../src"));
    }

    #[test]
    fn test_descendant_is_strict_and_component_wise()
    {
        let a = FoundModule::new("/r/a", "a", "/r");
        let ab = FoundModule::new("/r/a/b.py", "a/b.py", "/r");
        let abc = FoundModule::new("/r/abc", "abc", "/r");

        assert!(ab.is_descendant_of(&a));
        assert!(!a.is_descendant_of(&ab));
        assert!(!a.is_descendant_of(&a));
        assert!(!abc.is_descendant_of(&a));
    }

    #[test]
    fn test_kind_reflects_disk() -> anyhow::Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        fs::create_dir_all(root.join("pkg"))?;
        fs::write(root.join("mod.py"), "")?;

        let pkg = FoundModule::new(root.join("pkg"), "pkg", root);
        let module = FoundModule::new(root.join("mod.py"), "mod.py", root);
        let gone = FoundModule::new(root.join("gone.py"), "gone.py", root);

        assert!(pkg.is_package_dir() && !pkg.is_module_file());
        assert_eq!(pkg.kind(), ModuleKind::Package);
        assert_eq!(module.kind(), ModuleKind::Module);
        assert_eq!(gone.kind(), ModuleKind::Missing);

        let rec = module.record();
        assert_eq!(rec.name, "mod");
        assert_eq!(rec.kind, ModuleKind::Module);
        Ok(())
    }

    #[test]
    fn test_stub_and_source_are_one_module() -> anyhow::Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        fs::create_dir_all(root.join("mod"))?;
        fs::write(root.join("mod.py"), "")?;
        fs::write(root.join("mod.pyi"), "")?;

        let source = FoundModule::new(root.join("mod.py"), "mod.py", root);
        let stub = FoundModule::new(root.join("mod.pyi"), "mod.pyi", root);
        let dir = FoundModule::new(root.join("mod"), "mod", root);
        let dir_again = FoundModule::new(root.join("mod"), "mod", root);

        assert!(stub.is_same_module(&source));
        assert!(stub.is_covered_by(&source));
        assert!(dir_again.is_covered_by(&dir));
        // a package dir and a same-named file stay distinct
        assert!(!dir.is_same_module(&source));
        assert!(!source.is_covered_by(&dir));
        Ok(())
    }

    #[test]
    fn test_debug_lists_derived_fields()
    {
        let m = FoundModule::new("/r/a", "a", "r");
        let out = format!("{m:?}");
        assert!(out.starts_with("FoundModule("));
        assert!(out.contains("name            = \"a\""));
        assert!(out.contains("is_module_file  = false"));
    }
}
