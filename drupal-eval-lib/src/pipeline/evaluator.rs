use super::download::ArchiveSource;
use super::integration::IntegrationCheck;
use super::options::EvaluationOptions;
use super::progress::Progress;
use crate::Result;
use crate::analysis::{
    CompatibilityScan, DeprecationMetrics, DeprecationScan, ManifestMetrics, ManifestValidation, StyleScan, ToolHandle, ToolSettings,
    ViolationMetrics, start,
};
use crate::issues::IssueStats;
use crate::registry::{Project, RegistryClient, Release};
use crate::releases::{Branch, ReleaseStats, ReleaseTarget, find_recommended_release};
use crate::reports::EvaluationReport;
use crate::scoring::{ScoringInputs, round2, score};
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) const LOG_TARGET: &str = "  pipeline";

/// Runs the full evaluation of one project branch.
pub struct Evaluator {
    registry: RegistryClient,
    archives: ArchiveSource,
    integration: IntegrationCheck,
    tools: ToolSettings,
    work_dir: PathBuf,
    now: DateTime<Utc>,
    verbose: bool,
    progress: Arc<dyn Progress>,
}

impl core::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Evaluator")
            .field("registry", &self.registry)
            .field("archives", &self.archives)
            .field("integration", &self.integration)
            .field("tools", &self.tools)
            .field("work_dir", &self.work_dir)
            .field("now", &self.now)
            .field("verbose", &self.verbose)
            .field("progress", &"<dyn Progress>")
            .finish()
    }
}

/// Results of the four analysis tools.
struct ToolMetrics {
    deprecation: DeprecationMetrics,
    style: ViolationMetrics,
    compatibility: ViolationMetrics,
    manifest: ManifestMetrics,
}

impl Evaluator {
    /// Creates an evaluator that unpacks archives under `work_dir` and dates its reports `now`.
    #[must_use]
    pub fn new(
        registry: RegistryClient,
        archives: ArchiveSource,
        integration: IntegrationCheck,
        tools: ToolSettings,
        work_dir: impl Into<PathBuf>,
        now: DateTime<Utc>,
        progress: impl Progress + 'static,
    ) -> Self {
        Self {
            registry,
            archives,
            integration,
            tools,
            work_dir: work_dir.into(),
            now,
            verbose: false,
            progress: Arc::new(progress),
        }
    }

    /// Surfaces analysis-tool stderr when a tool fails.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn progress(&self) -> &dyn Progress {
        self.progress.as_ref()
    }

    /// Evaluates `name` on `branch` (e.g. `8.x-3.x-dev`).
    pub async fn evaluate_one(&self, name: &str, branch: &str, options: EvaluationOptions) -> Result<EvaluationReport> {
        let branch = Branch::parse(branch)?;
        log::info!(target: LOG_TARGET, "Evaluating {name} {branch}");
        self.progress.set_phase("Evaluating");

        self.step(name, &branch, "querying project metadata");
        let project = self.registry.get_project(name).await?;

        self.step(name, &branch, "querying project releases");
        let releases = self.registry.get_project_releases(&project, branch.core_compatibility()).await?;
        let recommended = find_recommended_release(name, &releases, &ReleaseTarget::branch(&branch))?;
        let scanned_version = if options.scan_stable {
            recommended.version.clone()
        } else {
            branch.as_str().to_string()
        };
        log::debug!(target: LOG_TARGET, "Recommended release of {name} is {}, scanning {scanned_version}", recommended.version);

        self.step(name, &branch, "downloading project archive");
        let scratch = tempfile::Builder::new()
            .prefix(&format!("{name}-"))
            .tempdir_in(&self.work_dir)
            .into_app_err_with(|| format!("could not create a working directory in '{}'", self.work_dir.display()))?;
        let target = self.archives.fetch(name, &scanned_version, scratch.path()).await?;

        self.step(name, &branch, "starting code analysis");
        let deprecation = if DeprecationScan::applies_to(branch.core_major()) {
            start(DeprecationScan::new(&self.tools), &target, self.tools.timeout)?
        } else {
            ToolHandle::skipped(DeprecationScan::new(&self.tools), &target)
        };
        let style = start(StyleScan::new(&self.tools), &target, self.tools.timeout)?;
        let compatibility = start(CompatibilityScan::new(&self.tools), &target, self.tools.timeout)?;
        let manifest = start(ManifestValidation::new(&self.tools), &target, self.tools.timeout)?;

        self.step(name, &branch, "calculating issue statistics");
        let issues = IssueStats::collect(&self.registry, &project, &branch).await?;

        self.step(name, &branch, "calculating release statistics");
        let release_stats = ReleaseStats::summarize(&releases, self.now);

        self.step(name, &branch, "waiting for code analysis");
        let tools = ToolMetrics {
            deprecation: deprecation.end(self.verbose).await,
            style: style.end(self.verbose).await,
            compatibility: compatibility.end(self.verbose).await,
            manifest: manifest.end(self.verbose).await,
        };
        drop(scratch);

        self.step(name, &branch, "checking downstream integration");
        let integrated = self.integration.is_integrated(name, &scanned_version).await;

        let report = self.assemble(
            &project,
            &branch,
            recommended,
            scanned_version,
            &issues,
            &release_stats,
            &tools,
            integrated,
        );
        log::info!(target: LOG_TARGET, "{name} {branch} scored {:.2}%", report.score);
        Ok(report)
    }

    fn step(&self, name: &str, branch: &Branch, what: &str) {
        self.progress.set_message(&format!("{name}:{branch}: {what}"));
    }

    #[expect(clippy::too_many_arguments, reason = "each argument is a distinct evaluation stage result")]
    fn assemble(
        &self,
        project: &Project,
        branch: &Branch,
        recommended: &Release,
        scanned_version: String,
        issues: &IssueStats,
        releases: &ReleaseStats,
        tools: &ToolMetrics,
        integrated: bool,
    ) -> EvaluationReport {
        let card = score(&ScoringInputs {
            security_covered: project.is_security_covered(),
            stable: recommended.is_stable(),
            critical_issues: issues.critical,
            major_issues: issues.major,
            rtbc_issues: issues.rtbc,
            deprecation_errors: tools.deprecation.errors,
            style_problems: tools.style.problems(),
            compatibility_problems: tools.compatibility.problems(),
            days_since_last_release: releases.days_since_last,
            manifest: tools.manifest.outcome,
            integrated,
        });

        EvaluationReport {
            name: project.machine_name.clone(),
            title: project.title.clone(),
            branch: branch.as_str().to_string(),
            score: card.percentage(),
            scored_points: round2(card.scored()),
            total_points: card.total(),
            security_advisory_coverage: project.security_advisory_coverage.clone(),
            starred: project.star_count,
            usage: project.usage_for(&branch.version()),
            recommended_version: recommended.version.clone(),
            scanned_version,
            is_stable: recommended.is_stable(),
            issues_total: issues.total,
            issues_priority_critical: issues.critical,
            issues_priority_major: issues.major,
            issues_priority_normal: issues.normal,
            issues_priority_minor: issues.minor,
            issues_category_bug: issues.bug,
            issues_category_feature: issues.feature,
            issues_category_support: issues.support,
            issues_category_task: issues.task,
            issues_category_plan: issues.plan,
            issues_status_rtbc: issues.rtbc,
            issues_status_fixed_last: issues.last_fixed,
            releases_total: releases.total,
            releases_last: releases.last,
            releases_days_since: releases.days_since_last,
            deprecation_errors: tools.deprecation.errors,
            deprecation_file_errors: tools.deprecation.file_errors,
            phpcs_drupal_errors: tools.style.errors,
            phpcs_drupal_warnings: tools.style.warnings,
            phpcs_compat_errors: tools.compatibility.errors,
            phpcs_compat_warnings: tools.compatibility.warnings,
            composer_validate: tools.manifest.outcome,
            orca_integrated: integrated,
            report_datetime: self.now,
        }
    }
}
