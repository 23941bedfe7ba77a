//! Typed views of the webhook bodies the receiver understands.
//!
//! Only the fields the normalizer reads are declared; everything else in the
//! delivery is ignored by serde. Fields that are only needed for some
//! pull-request sub-cases are optional here and required by the normalizer.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub pusher: Pusher,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub commits: Vec<Commit>,
}

// Tag pushes and branch deletions can carry `"commits": null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Commit>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Commit>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Deserialize)]
pub struct Pusher {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Commit {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestPayload {
    pub action: String,
    pub pull_request: PullRequest,
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub merged: bool,
    pub user: Option<Account>,
    pub merged_by: Option<Account>,
    pub head: Option<BranchRef>,
    pub base: Option<BranchRef>,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub name: String,
}
