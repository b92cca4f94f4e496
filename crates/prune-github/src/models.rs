use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GitHubBranch {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GitHubPullRequest {
    pub number: u64,
    #[serde(default)]
    pub state: Option<String>,
}

pub fn parse_branches(body: &[u8]) -> serde_json::Result<Vec<String>> {
    let branches: Vec<GitHubBranch> = serde_json::from_slice(body)?;
    Ok(branches.into_iter().map(|b| b.name).collect())
}

pub fn parse_pull_requests(body: &[u8]) -> serde_json::Result<Vec<u64>> {
    let pulls: Vec<GitHubPullRequest> = serde_json::from_slice(body)?;
    Ok(pulls
        .into_iter()
        .filter(|p| p.state.as_deref().is_none_or(|s| s == "open"))
        .map(|p| p.number)
        .collect())
}
