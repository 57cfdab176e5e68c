//! GitHub API 연동 구현.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;

use crate::application::ports::HostingGateway;
use crate::domain::pull_request::PullRequest;

pub struct GitHubClient {
    client: Client,
    host: String,
    owner: String,
    repo: String,
    token: Option<String>,
    api_base: Option<String>,
}

impl GitHubClient {
    /// GitHub 대상 클라이언트를 생성한다.
    pub fn new(
        host: String,
        owner: String,
        repo: String,
        token: Option<String>,
        api_base: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            host,
            owner,
            repo,
            token,
            api_base,
        }
    }

    fn api_base(&self) -> String {
        // github.com은 공개 API, 그 외는 Enterprise 기본 경로를 사용한다.
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        if self.host == "github.com" {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.host)
        }
    }

    fn pulls_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/pulls",
            self.api_base(),
            self.owner,
            self.repo
        )
    }

    fn requested_reviewers_endpoint(&self, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/requested_reviewers",
            self.api_base(),
            self.owner,
            self.repo,
            number
        )
    }

    fn user_endpoint(&self, login: &str) -> String {
        format!("{}/users/{}", self.api_base(), login)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "prnudge")
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }
}

#[derive(Debug, Deserialize)]
struct PullItem {
    number: u64,
    title: String,
    html_url: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    labels: Vec<LabelItem>,
    #[serde(default)]
    requested_reviewers: Vec<UserRef>,
}

#[derive(Debug, Deserialize)]
struct LabelItem {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UserRef {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RequestedReviewersResponse {
    #[serde(default)]
    users: Vec<UserRef>,
}

#[derive(Debug, Deserialize)]
struct UserProfileResponse {
    email: Option<String>,
}

#[async_trait]
impl HostingGateway for GitHubClient {
    async fn list_open_pulls(&self, page: u32, per_page: u32) -> Result<Vec<PullRequest>> {
        let resp = self
            .request(Method::GET, self.pulls_endpoint())
            .query(&[
                ("state", "open".to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await
            .context("github: failed to list open PRs")?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("github: failed to read PR list body")?;
        if !status.is_success() {
            anyhow::bail!("github: failed to list open PRs ({status}): {body}");
        }

        let pulls: Vec<PullItem> =
            serde_json::from_str(&body).context("github: invalid PR list JSON")?;

        Ok(pulls
            .into_iter()
            .map(|pr| PullRequest {
                number: pr.number,
                title: pr.title,
                url: pr.html_url,
                draft: pr.draft,
                labels: pr.labels.into_iter().map(|l| l.name).collect(),
                requested_reviewers: pr
                    .requested_reviewers
                    .into_iter()
                    .map(|u| u.login)
                    .collect(),
            })
            .collect())
    }

    async fn fetch_requested_reviewers(&self, number: u64) -> Result<Vec<String>> {
        let resp = self
            .request(Method::GET, self.requested_reviewers_endpoint(number))
            .send()
            .await
            .with_context(|| format!("github: failed to fetch reviewers of #{number}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("github: failed to read reviewers body")?;
        if !status.is_success() {
            anyhow::bail!("github: failed to fetch reviewers of #{number} ({status}): {body}");
        }

        // 팀 단위 리뷰 요청은 다루지 않는다. 개인 리뷰어만 읽는다.
        let reviewers: RequestedReviewersResponse =
            serde_json::from_str(&body).context("github: invalid reviewers JSON")?;
        Ok(reviewers.users.into_iter().map(|u| u.login).collect())
    }

    async fn fetch_user_email(&self, login: &str) -> Result<Option<String>> {
        let resp = self
            .request(Method::GET, self.user_endpoint(login))
            .send()
            .await
            .with_context(|| format!("github: failed to fetch profile of {login}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("github: failed to read profile body")?;
        if !status.is_success() {
            anyhow::bail!("github: failed to fetch profile of {login} ({status}): {body}");
        }

        let profile: UserProfileResponse =
            serde_json::from_str(&body).context("github: invalid profile JSON")?;
        Ok(profile.email.filter(|e| !e.trim().is_empty()))
    }
}
