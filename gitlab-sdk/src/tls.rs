// ABOUTME: TLS trust configuration for connections to self-hosted GitLab
// ABOUTME: Loads custom CA bundles from a single file or a directory of certificates

use reqwest::Certificate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GitlabError, Result};

/// Load every certificate under `path` into the trust store used for the
/// connection. `path` may be a single bundle file or a directory of
/// certificate files.
pub(crate) fn load_ca_certificates(path: &Path) -> Result<Vec<Certificate>> {
    let mut certificates = Vec::new();

    for file in certificate_files(path)? {
        let pem = fs::read(&file).map_err(|err| {
            GitlabError::Configuration(format!(
                "failed to read CA certificate {}: {err}",
                file.display()
            ))
        })?;
        let certificate = Certificate::from_pem(&pem).map_err(|err| {
            GitlabError::Configuration(format!(
                "{} is not a valid PEM certificate: {err}",
                file.display()
            ))
        })?;
        certificates.push(certificate);
    }

    Ok(certificates)
}

fn certificate_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let entries = fs::read_dir(path).map_err(|err| {
        GitlabError::Configuration(format!(
            "failed to read CA certificate directory {}: {err}",
            path.display()
        ))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|candidate| candidate.is_file())
        .collect();
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_certificate_files_single_file() {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("ca-bundle.pem");
        File::create(&bundle).unwrap();

        let files = certificate_files(&bundle).unwrap();
        assert_eq!(files, vec![bundle]);
    }

    #[test]
    fn test_certificate_files_directory_is_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pem", "a.pem", "c.crt"] {
            File::create(dir.path().join(name)).unwrap();
        }
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let files = certificate_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.pem", "b.pem", "c.crt"]);
    }

    #[test]
    fn test_load_ca_certificates_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.pem");
        let mut file = File::create(&bogus).unwrap();
        writeln!(file, "this is not a certificate").unwrap();

        let err = load_ca_certificates(&bogus).unwrap_err();
        assert!(matches!(err, GitlabError::Configuration(_)));
        assert!(err.to_string().contains("bogus.pem"));
    }

    #[test]
    fn test_load_ca_certificates_missing_file() {
        let err = load_ca_certificates(Path::new("/nonexistent/ca.pem")).unwrap_err();
        assert!(matches!(err, GitlabError::Configuration(_)));
    }
}
