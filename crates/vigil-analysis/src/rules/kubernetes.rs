//! Kubernetes manifest rules — privilege, host access, hardening.

use serde_json::{json, Map, Value};

use vigil_core::{Entry, Finding, Severity};

use super::{Rule, RuleContext};

/// The Kubernetes rule pack in registration order.
pub(super) fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(PrivilegedContainerRule),
        Box::new(HostNamespaceRule),
        Box::new(HostPathVolumeRule),
        Box::new(RunAsNonRootRule),
        Box::new(PrivilegeEscalationRule),
        Box::new(ResourceLimitsRule),
        Box::new(LatestTagRule),
    ]
}

/// Locate the pod spec for workload kinds: Pod carries it at `spec`,
/// Deployments and friends at `spec.template.spec`, CronJobs one level
/// deeper. A pod spec is recognized by its `containers` key, so resources
/// without one (Services, ConfigMaps) produce no findings.
fn pod_spec(entry: &Entry) -> Option<&Map<String, Value>> {
    const CANDIDATES: [&str; 3] = [
        "spec",
        "spec.template.spec",
        "spec.jobTemplate.spec.template.spec",
    ];
    CANDIDATES
        .iter()
        .filter_map(|path| entry.map_at(path))
        .find(|spec| spec.contains_key("containers"))
}

/// All containers of a pod spec, init containers included, in manifest order.
fn containers(spec: &Map<String, Value>) -> Vec<&Map<String, Value>> {
    let mut out = Vec::new();
    for key in ["containers", "initContainers"] {
        if let Some(list) = spec.get(key).and_then(Value::as_array) {
            out.extend(list.iter().filter_map(Value::as_object));
        }
    }
    out
}

fn container_name(container: &Map<String, Value>) -> &str {
    container
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("unnamed")
}

fn security_context_bool(container: &Map<String, Value>, key: &str) -> Option<bool> {
    container
        .get("securityContext")
        .and_then(|sc| sc.get(key))
        .and_then(Value::as_bool)
}

/// Flags containers that request full host privileges.
pub struct PrivilegedContainerRule;

impl Rule for PrivilegedContainerRule {
    fn id(&self) -> &'static str {
        "K8S-PRIVILEGED"
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let Some(spec) = pod_spec(entry) else {
            return Vec::new();
        };
        containers(spec)
            .into_iter()
            .filter(|c| security_context_bool(c, "privileged") == Some(true))
            .map(|c| {
                let name = container_name(c);
                Finding::new(
                    self.id(),
                    Severity::Critical,
                    &entry.id,
                    format!("container {name} runs privileged"),
                )
                .with_detail(json!({ "container": name }))
            })
            .collect()
    }
}

/// Flags pods sharing a host namespace (PID, IPC, network).
pub struct HostNamespaceRule;

impl Rule for HostNamespaceRule {
    fn id(&self) -> &'static str {
        "K8S-HOST-NAMESPACE"
    }

    fn default_severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let Some(spec) = pod_spec(entry) else {
            return Vec::new();
        };
        ["hostPID", "hostIPC", "hostNetwork"]
            .iter()
            .filter(|flag| spec.get(**flag).and_then(Value::as_bool) == Some(true))
            .map(|flag| {
                Finding::new(
                    self.id(),
                    Severity::High,
                    &entry.id,
                    format!("pod shares the host {flag} namespace"),
                )
                .with_detail(json!({ "flag": flag }))
            })
            .collect()
    }
}

/// Flags hostPath volume mounts.
pub struct HostPathVolumeRule;

impl Rule for HostPathVolumeRule {
    fn id(&self) -> &'static str {
        "K8S-HOSTPATH-VOLUME"
    }

    fn default_severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let Some(spec) = pod_spec(entry) else {
            return Vec::new();
        };
        let Some(volumes) = spec.get("volumes").and_then(Value::as_array) else {
            return Vec::new();
        };
        volumes
            .iter()
            .filter_map(Value::as_object)
            .filter(|volume| volume.contains_key("hostPath"))
            .map(|volume| {
                let name = volume
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unnamed");
                let host_path = volume
                    .get("hostPath")
                    .and_then(|hp| hp.get("path"))
                    .and_then(Value::as_str)
                    .unwrap_or("<unspecified>");
                Finding::new(
                    self.id(),
                    Severity::High,
                    &entry.id,
                    format!("volume {name} mounts host path {host_path}"),
                )
                .with_detail(json!({ "volume": name, "path": host_path }))
            })
            .collect()
    }
}

/// Hardening: the pod must assert `runAsNonRoot: true`, either pod-wide or
/// on every container, with no container opting back out.
pub struct RunAsNonRootRule;

impl Rule for RunAsNonRootRule {
    fn id(&self) -> &'static str {
        "K8S-RUN-AS-ROOT"
    }

    fn default_severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, entry: &Entry, ctx: &RuleContext) -> Vec<Finding> {
        let Some(spec) = pod_spec(entry) else {
            return Vec::new();
        };
        let all = containers(spec);
        let pod_level = spec
            .get("securityContext")
            .and_then(|sc| sc.get("runAsNonRoot"))
            .and_then(Value::as_bool)
            == Some(true);
        let any_opt_out = all
            .iter()
            .any(|c| security_context_bool(c, "runAsNonRoot") == Some(false));
        let all_containers = !all.is_empty()
            && all
                .iter()
                .all(|c| security_context_bool(c, "runAsNonRoot") == Some(true));

        if (pod_level || all_containers) && !any_opt_out {
            return Vec::new();
        }
        vec![Finding::new(
            self.id(),
            ctx.hardening_severity(Severity::Medium),
            &entry.id,
            "pod does not enforce runAsNonRoot",
        )]
    }
}

/// Hardening: every container should set `allowPrivilegeEscalation: false`.
pub struct PrivilegeEscalationRule;

impl Rule for PrivilegeEscalationRule {
    fn id(&self) -> &'static str {
        "K8S-PRIVILEGE-ESCALATION"
    }

    fn default_severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, entry: &Entry, ctx: &RuleContext) -> Vec<Finding> {
        let Some(spec) = pod_spec(entry) else {
            return Vec::new();
        };
        containers(spec)
            .into_iter()
            .filter(|c| security_context_bool(c, "allowPrivilegeEscalation") != Some(false))
            .map(|c| {
                let name = container_name(c);
                Finding::new(
                    self.id(),
                    ctx.hardening_severity(Severity::Medium),
                    &entry.id,
                    format!("container {name} does not disable privilege escalation"),
                )
                .with_detail(json!({ "container": name }))
            })
            .collect()
    }
}

/// Hardening: containers should declare both resource requests and limits.
pub struct ResourceLimitsRule;

impl Rule for ResourceLimitsRule {
    fn id(&self) -> &'static str {
        "K8S-NO-RESOURCE-LIMITS"
    }

    fn default_severity(&self) -> Severity {
        Severity::Low
    }

    fn evaluate(&self, entry: &Entry, ctx: &RuleContext) -> Vec<Finding> {
        let Some(spec) = pod_spec(entry) else {
            return Vec::new();
        };
        let mut findings = Vec::new();
        for container in containers(spec) {
            let resources = container.get("resources").and_then(Value::as_object);
            let has = |key: &str| {
                resources
                    .and_then(|r| r.get(key))
                    .and_then(Value::as_object)
                    .is_some_and(|m| !m.is_empty())
            };
            let missing: Vec<&str> = [("requests", has("requests")), ("limits", has("limits"))]
                .iter()
                .filter(|(_, present)| !present)
                .map(|(key, _)| *key)
                .collect();
            if missing.is_empty() {
                continue;
            }
            let name = container_name(container);
            findings.push(
                Finding::new(
                    self.id(),
                    ctx.hardening_severity(Severity::Low),
                    &entry.id,
                    format!("container {name} missing resource {}", missing.join(" and ")),
                )
                .with_detail(json!({ "container": name, "missing": missing })),
            );
        }
        findings
    }
}

/// Flags images without a pinned tag (`:latest` or no tag at all).
pub struct LatestTagRule;

impl LatestTagRule {
    fn is_unpinned(image: &str) -> bool {
        // Digest references are pinned by definition.
        if image.contains('@') {
            return false;
        }
        let reference = image.rsplit('/').next().unwrap_or(image);
        match reference.split_once(':') {
            Some((_, tag)) => tag == "latest",
            None => true,
        }
    }
}

impl Rule for LatestTagRule {
    fn id(&self) -> &'static str {
        "K8S-LATEST-TAG"
    }

    fn default_severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let Some(spec) = pod_spec(entry) else {
            return Vec::new();
        };
        containers(spec)
            .into_iter()
            .filter_map(|c| {
                let image = c.get("image").and_then(Value::as_str)?;
                if !Self::is_unpinned(image) {
                    return None;
                }
                let name = container_name(c);
                Some(
                    Finding::new(
                        self.id(),
                        Severity::Medium,
                        &entry.id,
                        format!("container {name} uses an unpinned image tag ({image})"),
                    )
                    .with_detail(json!({ "container": name, "image": image })),
                )
            })
            .collect()
    }
}
