//! In-memory `GitObjectStore` for tests: content-addressed blobs, flat trees,
//! commits with parents, branch refs, per-step call counters, and a switch to
//! make any one step fail.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::publish::{GitObjectStore, PublishError, TreeEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    ReadHead,
    ReadCommit,
    CreateBlob,
    CreateTree,
    CreateCommit,
    UpdateBranch,
}

#[derive(Debug, Clone)]
struct Commit {
    tree: String,
    parents: Vec<String>,
    message: String,
}

#[derive(Debug, Default)]
struct State {
    blobs: HashMap<String, Vec<u8>>,
    trees: HashMap<String, BTreeMap<String, String>>,
    commits: HashMap<String, Commit>,
    refs: HashMap<String, String>,
    calls: HashMap<Step, usize>,
    fail_on: Option<Step>,
    next_commit: usize,
}

impl State {
    fn put_blob(&mut self, content: &[u8]) -> String {
        let sha = format!("blob-{:016x}", digest(content));
        self.blobs.insert(sha.clone(), content.to_vec());
        sha
    }

    fn put_tree(&mut self, tree: BTreeMap<String, String>) -> String {
        let sha = format!("tree-{:016x}", digest(&tree));
        self.trees.insert(sha.clone(), tree);
        sha
    }

    fn put_commit(&mut self, tree: String, parents: Vec<String>, message: &str) -> String {
        self.next_commit += 1;
        let sha = format!("commit-{}", self.next_commit);
        self.commits.insert(
            sha.clone(),
            Commit {
                tree,
                parents,
                message: message.to_string(),
            },
        );
        sha
    }

    fn enter(&mut self, step: Step) -> Result<(), PublishError> {
        *self.calls.entry(step).or_default() += 1;
        if self.fail_on == Some(step) {
            return Err(api_error(step, 500, "injected failure"));
        }
        Ok(())
    }
}

fn digest<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn api_error(step: Step, status: u16, message: &str) -> PublishError {
    PublishError::Api {
        endpoint: format!("{step:?}"),
        status,
        message: message.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// A store whose `branch` points at a root commit containing `files`
    /// (`(path, contents)` pairs).
    pub fn with_branch(branch: &str, files: &[(String, String)]) -> Self {
        let mut state = State::default();
        let mut tree = BTreeMap::new();
        for (path, contents) in files {
            let sha = state.put_blob(contents.as_bytes());
            tree.insert(path.clone(), sha);
        }
        let tree_sha = state.put_tree(tree);
        let commit = state.put_commit(tree_sha, Vec::new(), "Initial commit");
        state.refs.insert(branch.to_string(), commit);
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn fail_on(&self, step: Step) {
        self.state.lock().unwrap().fail_on = Some(step);
    }

    pub fn calls(&self, step: Step) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(&step)
            .copied()
            .unwrap_or(0)
    }

    pub fn head(&self, branch: &str) -> String {
        self.state.lock().unwrap().refs[branch].clone()
    }

    pub fn tree(&self, tree_sha: &str) -> BTreeMap<String, String> {
        self.state.lock().unwrap().trees[tree_sha].clone()
    }

    pub fn tree_of_commit(&self, commit_sha: &str) -> BTreeMap<String, String> {
        let tree_sha = self.state.lock().unwrap().commits[commit_sha].tree.clone();
        self.tree(&tree_sha)
    }

    pub fn parents(&self, commit_sha: &str) -> Vec<String> {
        self.state.lock().unwrap().commits[commit_sha].parents.clone()
    }

    pub fn message(&self, commit_sha: &str) -> String {
        self.state.lock().unwrap().commits[commit_sha].message.clone()
    }
}

#[async_trait]
impl GitObjectStore for MemoryStore {
    async fn branch_head(&self, branch: &str) -> Result<String, PublishError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Step::ReadHead)?;
        state
            .refs
            .get(branch)
            .cloned()
            .ok_or_else(|| api_error(Step::ReadHead, 404, "Not Found"))
    }

    async fn commit_tree(&self, commit_sha: &str) -> Result<String, PublishError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Step::ReadCommit)?;
        state
            .commits
            .get(commit_sha)
            .map(|c| c.tree.clone())
            .ok_or_else(|| api_error(Step::ReadCommit, 404, "Not Found"))
    }

    async fn create_blob(&self, content: &[u8]) -> Result<String, PublishError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Step::CreateBlob)?;
        Ok(state.put_blob(content))
    }

    async fn create_tree(
        &self,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String, PublishError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Step::CreateTree)?;
        let mut tree = state
            .trees
            .get(base_tree)
            .cloned()
            .ok_or_else(|| api_error(Step::CreateTree, 422, "base_tree not found"))?;
        for entry in entries {
            if !state.blobs.contains_key(&entry.sha) {
                return Err(api_error(Step::CreateTree, 422, "blob not found"));
            }
            tree.insert(entry.path.clone(), entry.sha.clone());
        }
        Ok(state.put_tree(tree))
    }

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parents: &[String],
    ) -> Result<String, PublishError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Step::CreateCommit)?;
        if !state.trees.contains_key(tree_sha) {
            return Err(api_error(Step::CreateCommit, 422, "tree not found"));
        }
        Ok(state.put_commit(tree_sha.to_string(), parents.to_vec(), message))
    }

    async fn update_branch(&self, branch: &str, commit_sha: &str) -> Result<(), PublishError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Step::UpdateBranch)?;
        if !state.commits.contains_key(commit_sha) {
            return Err(api_error(Step::UpdateBranch, 422, "commit not found"));
        }
        state.refs.insert(branch.to_string(), commit_sha.to_string());
        Ok(())
    }
}
