//! Built-in demonstration documents, one per domain.
//!
//! Each document is constructed to trip several rules so `--demo` output
//! shows the full report shape without any external input.

use serde_json::{json, Value};

use vigil_core::DocumentKind;

pub fn document(kind: DocumentKind) -> Value {
    match kind {
        DocumentKind::TerraformPlan => terraform_plan(),
        DocumentKind::KubernetesManifest => kubernetes_manifests(),
        DocumentKind::TokenContract => token_contract(),
    }
}

fn terraform_plan() -> Value {
    json!({
        "resource_changes": [
            {
                "address": "aws_security_group.demo_web",
                "type": "aws_security_group",
                "change": {
                    "actions": ["create"],
                    "after": {
                        "tags": {"env": "demo"},
                        "ingress": [
                            {"from_port": 22, "to_port": 22, "cidr_blocks": ["0.0.0.0/0"]}
                        ]
                    }
                }
            },
            {
                "address": "aws_s3_bucket.demo_public",
                "type": "aws_s3_bucket",
                "change": {
                    "actions": ["create"],
                    "after": {"acl": "public-read"}
                }
            },
            {
                "address": "aws_iam_policy.demo_admin",
                "type": "aws_iam_policy",
                "change": {
                    "actions": ["create"],
                    "after": {
                        "policy": "{\"Statement\":[{\"Effect\":\"Allow\",\"Action\":\"*\",\"Resource\":\"*\"}]}"
                    }
                }
            },
            {
                "address": "aws_db_instance.demo_old",
                "type": "aws_db_instance",
                "change": {"actions": ["delete"]}
            }
        ]
    })
}

fn kubernetes_manifests() -> Value {
    json!([
        {
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "demo-web"},
            "spec": {
                "replicas": 1,
                "template": {
                    "spec": {
                        "hostNetwork": true,
                        "containers": [
                            {
                                "name": "web",
                                "image": "demo/web:latest",
                                "securityContext": {"privileged": true}
                            }
                        ],
                        "volumes": [
                            {"name": "host-logs", "hostPath": {"path": "/var/log"}}
                        ]
                    }
                }
            }
        },
        {
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {"name": "demo-web"},
            "spec": {"ports": [{"port": 80}]}
        }
    ])
}

fn token_contract() -> Value {
    json!({
        "address": "0x00000000000000000000000000000000000d3m0",
        "symbol": "DEMO",
        "can_sell": true,
        "buy_tax_percent": 2.0,
        "sell_tax_percent": 18.0,
        "tax_mutable": true,
        "owner_renounced": false,
        "mint_authority": "0x00000000000000000000000000000000000d3m0",
        "allowances": [
            {
                "spender": "0x00000000000000000000000000000000000r0t3",
                "amount": "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            }
        ]
    })
}
