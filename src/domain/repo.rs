//! 입력 URL을 알림 대상 리포지토리로 해석하는 모듈.

use anyhow::{Result, bail};
use url::Url;

#[derive(Debug, Clone)]
pub struct RepoTarget {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub url: String,
}

impl RepoTarget {
    /// `https://<host>/<owner>/<repo>(.git)` 형태의 리포 URL을 해석한다.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input)?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("URL host is missing"))?
            .to_string();

        let segments: Vec<String> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).map(ToString::to_string).collect())
            .unwrap_or_default();

        let [owner, repo] = segments.as_slice() else {
            bail!("unsupported repository URL format: {input}");
        };

        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if owner.is_empty() || repo.is_empty() {
            bail!("unsupported repository URL format: {input}");
        }

        Ok(Self {
            host,
            owner: owner.clone(),
            repo: repo.to_string(),
            url: input.to_string(),
        })
    }

    /// `owner/repo` 표기. 헤더 문구에 삽입된다.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_repo_url() {
        let target = RepoTarget::parse("https://github.com/acme/widgets").unwrap();
        assert_eq!(target.host, "github.com");
        assert_eq!(target.owner, "acme");
        assert_eq!(target.repo, "widgets");
        assert_eq!(target.full_name(), "acme/widgets");
    }

    #[test]
    fn strips_git_suffix() {
        let target = RepoTarget::parse("https://github.com/acme/widgets.git").unwrap();
        assert_eq!(target.repo, "widgets");
    }

    #[test]
    fn rejects_non_repo_paths() {
        assert!(RepoTarget::parse("https://github.com/acme").is_err());
        assert!(RepoTarget::parse("https://github.com/acme/widgets/pull/3").is_err());
        assert!(RepoTarget::parse("not a url").is_err());
    }
}
