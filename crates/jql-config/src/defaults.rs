//! Built-in field and function names.

/// System fields known unless `[fields] system = false`.
pub const SYSTEM_FIELDS: &[&str] = &[
    "affectedVersion",
    "assignee",
    "attachments",
    "category",
    "comment",
    "component",
    "created",
    "createdDate",
    "creator",
    "description",
    "due",
    "duedate",
    "environment",
    "filter",
    "fixVersion",
    "id",
    "issue",
    "issueKey",
    "issueLinkType",
    "issuetype",
    "key",
    "labels",
    "lastViewed",
    "level",
    "originalEstimate",
    "parent",
    "priority",
    "project",
    "remainingEstimate",
    "reporter",
    "request",
    "resolution",
    "resolutiondate",
    "resolved",
    "savedfilter",
    "searchrequest",
    "status",
    "statusCategory",
    "subtasks",
    "summary",
    "text",
    "timeestimate",
    "timeoriginalestimate",
    "timespent",
    "type",
    "updated",
    "updatedDate",
    "voter",
    "votes",
    "watcher",
    "watchers",
    "worklogAuthor",
    "worklogComment",
    "worklogDate",
    "workratio",
];

/// Functions registered and enabled by default.
pub const SYSTEM_FUNCTIONS: &[&str] = &[
    "cascadeOption",
    "componentsLeadByUser",
    "currentLogin",
    "currentUser",
    "earliestUnreleasedVersion",
    "endOfDay",
    "endOfMonth",
    "endOfWeek",
    "endOfYear",
    "issueHistory",
    "issuesWithRemoteLinksByGlobalId",
    "lastLogin",
    "latestReleasedVersion",
    "linkedIssues",
    "membersOf",
    "now",
    "projectsLeadByUser",
    "projectsWhereUserHasPermission",
    "projectsWhereUserHasRole",
    "releasedVersions",
    "standardIssueTypes",
    "startOfDay",
    "startOfMonth",
    "startOfWeek",
    "startOfYear",
    "subtaskIssueTypes",
    "unreleasedVersions",
    "votedIssues",
    "watchedIssues",
];
