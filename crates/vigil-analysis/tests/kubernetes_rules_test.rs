//! End-to-end tests for the Kubernetes manifest audit.

use serde_json::json;

use vigil_analysis::run_audit;
use vigil_core::{AuditOptions, DocumentKind, DocumentSource, Report, Ruleset, Severity};

fn audit(manifests: serde_json::Value) -> Report {
    audit_with(manifests, AuditOptions::default())
}

fn audit_with(manifests: serde_json::Value, options: AuditOptions) -> Report {
    run_audit(
        DocumentKind::KubernetesManifest,
        &DocumentSource::from_inline(manifests),
        &options,
    )
    .unwrap()
}

#[test]
fn privileged_pod_raises_multiple_findings() {
    let report = audit(json!([{
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {"name": "debug"},
        "spec": {
            "containers": [{
                "name": "shell",
                "image": "busybox:1.36",
                "securityContext": {"privileged": true},
                "resources": {"requests": {}, "limits": {}}
            }]
        }
    }]));

    assert!(report.findings.len() >= 2);
    let privileged = report
        .findings
        .iter()
        .find(|f| f.rule_id == "K8S-PRIVILEGED")
        .unwrap();
    assert_eq!(privileged.severity, Severity::Critical);
    assert_eq!(privileged.resource_id, "Pod/debug");
    assert!(report
        .findings
        .iter()
        .any(|f| f.rule_id == "K8S-RUN-AS-ROOT"));
}

#[test]
fn deployment_template_spec_is_traversed() {
    let report = audit(json!([{
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {"name": "web"},
        "spec": {
            "replicas": 2,
            "template": {
                "spec": {
                    "hostNetwork": true,
                    "containers": [{"name": "app", "image": "web:latest"}]
                }
            }
        }
    }]));

    assert!(report
        .findings
        .iter()
        .any(|f| f.rule_id == "K8S-HOST-NAMESPACE" && f.severity == Severity::High));
    let latest = report
        .findings
        .iter()
        .find(|f| f.rule_id == "K8S-LATEST-TAG")
        .unwrap();
    assert_eq!(latest.severity, Severity::Medium);
    assert_eq!(latest.detail.as_ref().unwrap()["image"], "web:latest");
}

#[test]
fn host_path_volume_is_high() {
    let report = audit(json!([{
        "kind": "Pod",
        "metadata": {"name": "node-agent"},
        "spec": {
            "containers": [{"name": "agent", "image": "agent:2.1"}],
            "volumes": [
                {"name": "docker-sock", "hostPath": {"path": "/var/run/docker.sock"}},
                {"name": "cache", "emptyDir": {}}
            ]
        }
    }]));

    let host_path: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.rule_id == "K8S-HOSTPATH-VOLUME")
        .collect();
    assert_eq!(host_path.len(), 1);
    assert_eq!(host_path[0].severity, Severity::High);
    assert_eq!(
        host_path[0].detail.as_ref().unwrap()["path"],
        "/var/run/docker.sock"
    );
}

#[test]
fn run_as_non_root_satisfied_at_pod_level() {
    let report = audit(json!([{
        "kind": "Pod",
        "metadata": {"name": "quiet"},
        "spec": {
            "securityContext": {"runAsNonRoot": true},
            "containers": [{
                "name": "app",
                "image": "app:1.0",
                "securityContext": {"allowPrivilegeEscalation": false},
                "resources": {
                    "requests": {"cpu": "100m", "memory": "64Mi"},
                    "limits": {"cpu": "200m", "memory": "128Mi"}
                }
            }]
        }
    }]));
    assert!(report.findings.is_empty());
    assert_eq!(report.risk_score, 0);
}

#[test]
fn container_opt_out_defeats_pod_level_non_root() {
    let report = audit(json!([{
        "kind": "Pod",
        "metadata": {"name": "sneaky"},
        "spec": {
            "securityContext": {"runAsNonRoot": true},
            "containers": [{
                "name": "app",
                "image": "app:1.0",
                "securityContext": {"runAsNonRoot": false}
            }]
        }
    }]));
    assert!(report
        .findings
        .iter()
        .any(|f| f.rule_id == "K8S-RUN-AS-ROOT"));
}

#[test]
fn hardening_severities_scale_with_ruleset() {
    let pod = json!([{
        "kind": "Pod",
        "metadata": {"name": "plain"},
        "spec": {"containers": [{"name": "app", "image": "app:1.0"}]}
    }]);

    let severity_of = |report: &Report, rule_id: &str| {
        report
            .findings
            .iter()
            .find(|f| f.rule_id == rule_id)
            .unwrap()
            .severity
    };

    let baseline = audit(pod.clone());
    assert_eq!(severity_of(&baseline, "K8S-RUN-AS-ROOT"), Severity::Medium);
    assert_eq!(
        severity_of(&baseline, "K8S-PRIVILEGE-ESCALATION"),
        Severity::Medium
    );
    assert_eq!(severity_of(&baseline, "K8S-NO-RESOURCE-LIMITS"), Severity::Low);

    let restricted = audit_with(
        pod,
        AuditOptions {
            ruleset: Some(Ruleset::Restricted),
            ..Default::default()
        },
    );
    assert_eq!(severity_of(&restricted, "K8S-RUN-AS-ROOT"), Severity::High);
    assert_eq!(
        severity_of(&restricted, "K8S-PRIVILEGE-ESCALATION"),
        Severity::High
    );
    assert_eq!(severity_of(&restricted, "K8S-NO-RESOURCE-LIMITS"), Severity::Medium);
}

#[test]
fn missing_resource_limits_names_what_is_missing() {
    let report = audit(json!([{
        "kind": "Pod",
        "metadata": {"name": "hungry"},
        "spec": {
            "securityContext": {"runAsNonRoot": true},
            "containers": [{
                "name": "app",
                "image": "app:1.0",
                "securityContext": {"allowPrivilegeEscalation": false},
                "resources": {"requests": {"cpu": "100m"}}
            }]
        }
    }]));
    let finding = report
        .findings
        .iter()
        .find(|f| f.rule_id == "K8S-NO-RESOURCE-LIMITS")
        .unwrap();
    let missing = finding.detail.as_ref().unwrap()["missing"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(missing, vec![json!("limits")]);
}

#[test]
fn non_workload_documents_are_quiet() {
    let report = audit(json!([
        {"kind": "Service", "metadata": {"name": "web"},
         "spec": {"ports": [{"port": 80}]}},
        {"kind": "ConfigMap", "metadata": {"name": "settings"},
         "data": {"mode": "strict"}}
    ]));
    assert_eq!(report.summary.resources_scanned, 2);
    assert!(report.findings.is_empty());
}

#[test]
fn multi_document_yaml_text_is_split() {
    let text = r#"
kind: Pod
metadata:
  name: one
spec:
  containers:
    - name: app
      image: app:latest
---
kind: Pod
metadata:
  name: two
spec:
  hostPID: true
  containers:
    - name: app
      image: app:1.0
"#;
    let report = run_audit(
        DocumentKind::KubernetesManifest,
        &DocumentSource::from_text(text),
        &AuditOptions::default(),
    )
    .unwrap();

    assert_eq!(report.summary.resources_scanned, 2);
    assert!(report
        .findings
        .iter()
        .any(|f| f.rule_id == "K8S-LATEST-TAG" && f.resource_id == "Pod/one"));
    assert!(report
        .findings
        .iter()
        .any(|f| f.rule_id == "K8S-HOST-NAMESPACE" && f.resource_id == "Pod/two"));
}

#[test]
fn document_without_kind_is_skipped() {
    let report = audit(json!([
        {"metadata": {"name": "mystery"}},
        {"kind": "Pod", "metadata": {"name": "ok"},
         "spec": {"securityContext": {"runAsNonRoot": true},
                  "containers": [{"name": "a", "image": "a:1",
                                  "securityContext": {"allowPrivilegeEscalation": false},
                                  "resources": {"requests": {"cpu": "1"}, "limits": {"cpu": "1"}}}]}}
    ]));
    assert_eq!(report.summary.resources_scanned, 1);
    assert_eq!(report.summary.skipped_entries, 1);
}
