//! Built-in DevOpsHub articles
//!
//! Used to scaffold new sites and as the corpus when a site has no posts
//! directory yet.

use chrono::NaiveDate;

use super::{Icon, Post, PostId};

struct SamplePost {
    id: PostId,
    title: &'static str,
    excerpt: &'static str,
    body: &'static str,
    category: &'static str,
    read_time: u32,
    date: (i32, u32, u32),
    icon: Icon,
    tags: &'static [&'static str],
}

const SAMPLES: &[SamplePost] = &[
    SamplePost {
        id: 1,
        title: "Kubernetes Best Practices for Production Environments",
        excerpt: "Learn how to optimize your K8s clusters for high availability, security, and performance at scale.",
        body: r#"Kubernetes has become the de facto standard for container orchestration, but running it in production takes more than `kubectl apply`.

## Resource requests and limits

Every container should declare what it needs. Without requests the scheduler is guessing.

```yaml
resources:
  requests:
    cpu: 250m
    memory: 256Mi
  limits:
    memory: 512Mi
```

## Probes

Readiness and liveness probes let the cluster route around unhealthy pods instead of sending them traffic.
"#,
        category: "Orchestration",
        read_time: 8,
        date: (2024, 2, 12),
        icon: Icon::Container,
        tags: &["Kubernetes", "Docker", "DevOps"],
    },
    SamplePost {
        id: 2,
        title: "Infrastructure as Code with Terraform & AWS",
        excerpt: "Master the art of declarative infrastructure management using Terraform modules and AWS best practices.",
        body: r#"Infrastructure as Code (IaC) revolutionizes how we manage cloud resources: every change is reviewed, versioned and repeatable.

## Modules

Keep modules small and composable. A VPC module should not also create your databases.

```hcl
module "network" {
  source     = "./modules/vpc"
  cidr_block = "10.0.0.0/16"
}
```

## Remote state

Store state in S3 with DynamoDB locking so two engineers never apply at once.
"#,
        category: "IaC",
        read_time: 12,
        date: (2024, 2, 10),
        icon: Icon::Cloud,
        tags: &["Terraform", "AWS", "Cloud"],
    },
    SamplePost {
        id: 3,
        title: "CI/CD Pipeline Security: DevSecOps Guide",
        excerpt: "Integrate security scanning into your pipelines without compromising delivery speed.",
        body: r#"Security shouldn't be an afterthought in your delivery pipeline. Shift checks left and make them fast.

## What to scan

- Dependencies, on every pull request
- Container images, before they are pushed
- Infrastructure definitions, before they are applied

Secrets belong in a vault, never in pipeline variables committed to the repository.
"#,
        category: "Security",
        read_time: 10,
        date: (2024, 2, 8),
        icon: Icon::Shield,
        tags: &["DevSecOps", "CI/CD", "Security"],
    },
    SamplePost {
        id: 4,
        title: "GitOps with ArgoCD: Declarative Continuous Delivery",
        excerpt: "Implement GitOps workflows using ArgoCD for automated, auditable deployments.",
        body: r#"GitOps uses Git as the single source of truth for declarative infrastructure and applications.

## The reconcile loop

ArgoCD watches a repository and continuously compares the desired state with what is running in the cluster. Drift is reported, and optionally corrected.

```yaml
apiVersion: argoproj.io/v1alpha1
kind: Application
spec:
  syncPolicy:
    automated:
      prune: true
```
"#,
        category: "GitOps",
        read_time: 15,
        date: (2024, 2, 5),
        icon: Icon::GitBranch,
        tags: &["GitOps", "ArgoCD", "Kubernetes"],
    },
    SamplePost {
        id: 5,
        title: "Observability: Beyond Monitoring with Prometheus & Grafana",
        excerpt: "Build comprehensive observability stacks covering metrics, logs, and distributed tracing.",
        body: r#"Modern systems require more than just monitoring; they need observability.

## The three signals

Metrics tell you *that* something is wrong, logs tell you *what* happened and traces tell you *where*.

```promql
histogram_quantile(0.99, sum(rate(http_request_duration_seconds_bucket[5m])) by (le))
```

Alert on symptoms your users feel, not on every CPU spike.
"#,
        category: "Observability",
        read_time: 11,
        date: (2024, 2, 2),
        icon: Icon::Server,
        tags: &["Monitoring", "Prometheus", "SRE"],
    },
    SamplePost {
        id: 6,
        title: "Serverless Architecture Patterns",
        excerpt: "Design scalable, cost-effective applications using AWS Lambda and event-driven architecture.",
        body: r#"Serverless computing abstracts infrastructure management so teams can focus on events and handlers.

## Patterns

- **Fan-out** with SNS and SQS for parallel processing
- **Saga** orchestration with Step Functions
- **Strangler** routing to migrate a monolith one endpoint at a time

Cold starts matter less than you think; measure before optimizing.
"#,
        category: "Serverless",
        read_time: 9,
        date: (2024, 1, 28),
        icon: Icon::Zap,
        tags: &["Lambda", "AWS", "Architecture"],
    },
];

/// The built-in articles in id order. Bodies are markdown; `content` is left
/// empty for the loader to render.
pub fn sample_posts() -> Vec<Post> {
    SAMPLES
        .iter()
        .map(|s| {
            let mut post = Post::new(s.id, s.title, s.excerpt, s.category);
            post.body = s.body.to_string();
            post.tags = s.tags.iter().map(|t| t.to_string()).collect();
            post.read_time = s.read_time;
            post.date = NaiveDate::from_ymd_opt(s.date.0, s.date.1, s.date.2).unwrap_or_default();
            post.icon = s.icon;
            post
        })
        .collect()
}
