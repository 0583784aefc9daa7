//! External command synthesis.
//!
//! Each type renders, through [`Display`](std::fmt::Display), the exact
//! shell command handed to [`shell::execute`](crate::shell::execute).

use std::fmt;
use std::path::{Path, PathBuf};

use crate::components::EnvVar;

/// `docker build` for one container image.
#[derive(Debug, Clone, PartialEq)]
pub struct DockerBuild {
    pub dockerfile: PathBuf,
    pub context: PathBuf,
    /// Full `name:tag` reference.
    pub tag: String,
    pub no_cache: bool,
}

impl fmt::Display for DockerBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DOCKER_BUILDKIT=1 docker build")?;
        if self.no_cache {
            write!(f, " --no-cache")?;
        }
        write!(
            f,
            " --build-arg GIT_TOKEN=\"$GIT_TOKEN\" -t {} -f {} {}",
            self.tag,
            self.dockerfile.display(),
            self.context.display()
        )
    }
}

/// `kubetpl render` for one manifest template.
#[derive(Debug, Clone, PartialEq)]
pub struct KubetplRender {
    pub manifest: PathBuf,
    /// Template data files, passed with `-i`.
    pub template_config: Vec<PathBuf>,
    /// Resolved variables, passed with `-s`.
    pub env: Vec<EnvVar>,
}

impl KubetplRender {
    /// The command with every `-s` value masked, for logs and errors.
    pub fn redacted(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_command(&mut out, true);
        out
    }

    fn write_command(&self, out: &mut impl fmt::Write, redact: bool) -> fmt::Result {
        write!(out, "kubetpl render --allow-fs-access {}", self.manifest.display())?;
        for file in &self.template_config {
            write!(out, " -i {}", file.display())?;
        }
        for var in &self.env {
            if redact {
                write!(out, " -s {}=***", var.key)?;
            } else {
                write!(out, " -s {}", var)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for KubetplRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_command(f, false)
    }
}

/// `kubectl apply` for a rendered manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct KubectlApply {
    pub file: PathBuf,
}

impl fmt::Display for KubectlApply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kubectl apply -f \"{}\"", self.file.display())
    }
}

/// `kubectl delete` for a rendered manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct KubectlDelete {
    pub file: PathBuf,
}

impl fmt::Display for KubectlDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kubectl delete -f \"{}\"", self.file.display())
    }
}

/// `kubectl port-forward` to a component's deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct KubectlPortForward {
    pub deployment: String,
    pub local_port: u16,
    pub remote_port: u16,
}

impl fmt::Display for KubectlPortForward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kubectl port-forward deployments/{} {}:{}",
            self.deployment, self.local_port, self.remote_port
        )
    }
}

/// `kubectl logs` for every container of a deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct KubectlLogs {
    pub deployment: String,
    pub follow: bool,
}

impl fmt::Display for KubectlLogs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kubectl logs --all-containers=true")?;
        if self.follow {
            write!(f, " -f")?;
        }
        write!(f, " deployment/{}", self.deployment)
    }
}

/// `kubectl get secrets` labelled with the stack name.
#[derive(Debug, Clone, PartialEq)]
pub struct KubectlSecrets {
    pub stack_name: String,
}

impl fmt::Display for KubectlSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kubectl get secrets -l stack={}", self.stack_name)
    }
}

/// `kubectl delete secrets` labelled with the stack name.
#[derive(Debug, Clone, PartialEq)]
pub struct KubectlDeleteSecrets {
    pub stack_name: String,
    /// Delete only the secret with this name.
    pub secret_name: Option<String>,
}

impl fmt::Display for KubectlDeleteSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kubectl delete secrets")?;
        if let Some(name) = &self.secret_name {
            write!(f, " {}", name)?;
        }
        write!(f, " -l stack={}", self.stack_name)
    }
}

/// `kubectl get pods` printing the names of the pods labelled `app=<app>`.
#[derive(Debug, Clone, PartialEq)]
pub struct KubectlGetPods {
    pub app: String,
    pub namespace: Option<String>,
}

impl fmt::Display for KubectlGetPods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kubectl get pods -l app={}", self.app)?;
        write_namespace(f, self.namespace.as_deref())?;
        write!(f, " -o jsonpath='{{.items[*].metadata.name}}'")
    }
}

/// `kubectl get pod` printing the container names of one pod.
#[derive(Debug, Clone, PartialEq)]
pub struct KubectlPodContainers {
    pub pod: String,
    pub namespace: Option<String>,
}

impl fmt::Display for KubectlPodContainers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kubectl get pod {}", self.pod)?;
        write_namespace(f, self.namespace.as_deref())?;
        write!(f, " -o jsonpath='{{.spec.containers[*].name}}'")
    }
}

/// `kubectl exec` running `command` in a pod.
#[derive(Debug, Clone, PartialEq)]
pub struct KubectlExec {
    pub pod: String,
    pub container: Option<String>,
    pub namespace: Option<String>,
    pub command: String,
    /// Attach a terminal (`-it`).
    pub interactive: bool,
}

impl fmt::Display for KubectlExec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kubectl exec")?;
        if self.interactive {
            write!(f, " -it")?;
        }
        write!(f, " {}", self.pod)?;
        write_namespace(f, self.namespace.as_deref())?;
        if let Some(container) = &self.container {
            write!(f, " --container {}", container)?;
        }
        write!(f, " -- {}", self.command)
    }
}

fn write_namespace(f: &mut fmt::Formatter<'_>, namespace: Option<&str>) -> fmt::Result {
    match namespace.filter(|n| !n.is_empty()) {
        Some(namespace) => write!(f, " -n {}", namespace),
        None => Ok(()),
    }
}

/// `kubectl config get-contexts`.
pub const KUBECTL_GET_CONTEXTS: &str = "kubectl config get-contexts";

/// Where `kubetpl` output for `manifest` is written.
///
/// `deployments/app.yaml` renders to `deployments/app-generated.yaml`.
pub fn generated_manifest_path(manifest: &Path) -> PathBuf {
    let stem = manifest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}-generated.yaml", stem);
    match manifest.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Image reference for a build: the explicit tag, else `<image>:<image_tag>`.
pub fn image_reference(image: &str, tag: Option<&str>, image_tag: Option<&str>) -> String {
    match tag.filter(|t| !t.is_empty()) {
        Some(tag) => tag.to_string(),
        None => format!(
            "{}:{}",
            image,
            image_tag.filter(|t| !t.is_empty()).unwrap_or("latest")
        ),
    }
}
