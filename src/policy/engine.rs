use super::actor::Actor;
use super::decision::{Decision, DenyReason};
use super::resource::{Action, Resource};
use crate::models::profiles::entities::ProfileRole;
use crate::models::submissions::entities::SubmissionStatus;

/// 评估一次操作是否允许
///
/// 优先级顺序，首个命中即返回：
/// 1. 未通过审批的主体：除读取本人档案外全部拒绝
/// 2. 已使用邀请的删除：终态，对管理员同样拒绝
/// 3. 管理员：全部放行
/// 4. 按资源类型的细则
/// 5. 默认拒绝
pub fn evaluate(actor: &Actor, action: Action, resource: &Resource) -> Decision {
    // 1. 审批门禁
    if !actor.is_approved() {
        let reading_own_profile = matches!(
            (action, resource),
            (Action::Read, Resource::Profile { owner_id }) if *owner_id == actor.id
        );
        if !reading_own_profile {
            return Decision::Deny(DenyReason::NotApproved);
        }
        return Decision::Allow;
    }

    // 2. 已使用的邀请是终态，删除对任何角色都拒绝
    if let (Action::Delete, Resource::Invitation { used: true, .. }) = (action, resource) {
        return Decision::Deny(DenyReason::AlreadyUsed);
    }

    // 3. 管理员放行
    if actor.is_admin() {
        return Decision::Allow;
    }

    // 4. 资源细则
    match resource {
        Resource::Profile { owner_id } => evaluate_profile(actor, action, *owner_id),
        Resource::Course {
            status,
            creator_id,
            relation,
            active_enrollments,
            assignments,
            active_instructors: _,
            changes_status,
        } => evaluate_course(
            actor,
            action,
            status,
            *creator_id,
            relation,
            *active_enrollments,
            *assignments,
            *changes_status,
        ),
        Resource::Question { course } => evaluate_question(actor, action, course.as_ref()),
        Resource::Assignment { course } => evaluate_assignment(action, course),
        Resource::Submission {
            student_id,
            status,
            course,
            grading,
        } => evaluate_submission(actor, action, *student_id, status, course, *grading),
        Resource::Invitation {
            invited_by,
            used: _,
            invite_role,
        } => evaluate_invitation(actor, action, *invited_by, invite_role.as_ref()),
    }
}

fn evaluate_profile(actor: &Actor, action: Action, owner_id: i64) -> Decision {
    match action {
        // 本人可读可改（角色与审批字段的保护在服务层）
        Action::Read | Action::Update if owner_id == actor.id => Decision::Allow,
        _ => Decision::Deny(DenyReason::RoleForbidden),
    }
}

#[allow(clippy::too_many_arguments)]
fn evaluate_course(
    actor: &Actor,
    action: Action,
    status: &crate::models::courses::entities::CourseStatus,
    creator_id: i64,
    relation: &super::resource::CourseRelation,
    active_enrollments: u64,
    assignments: u64,
    changes_status: bool,
) -> Decision {
    use crate::models::courses::entities::CourseStatus;

    match action {
        Action::Create => {
            if actor.role == ProfileRole::CourseLeader {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::RoleForbidden)
            }
        }
        Action::Read => {
            if *status == CourseStatus::Active
                || relation.is_instructor
                || relation.is_enrolled_active()
            {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotRelated)
            }
        }
        Action::Update => {
            if !relation.is_instructor {
                return conceal_unless_related(relation);
            }
            // 状态流转仅限管理员
            if changes_status {
                return Decision::Deny(DenyReason::StatusChangeForbidden);
            }
            Decision::Allow
        }
        Action::Delete => {
            if !relation.is_instructor || creator_id != actor.id {
                return conceal_unless_related(relation);
            }
            // 已有选课或作业的课程只能归档
            if active_enrollments > 0 || assignments > 0 {
                return Decision::Deny(DenyReason::CourseNotEmpty);
            }
            Decision::Allow
        }
    }
}

fn evaluate_question(
    actor: &Actor,
    action: Action,
    course: Option<&super::resource::CourseScope>,
) -> Decision {
    match course {
        // 全局题库：任何人可读，写需要课程负责人
        None => match action {
            Action::Read => Decision::Allow,
            _ => {
                if actor.role == ProfileRole::CourseLeader {
                    Decision::Allow
                } else {
                    Decision::Deny(DenyReason::RoleForbidden)
                }
            }
        },
        Some(scope) => match action {
            Action::Read => {
                if scope.relation.is_instructor || scope.relation.is_enrolled_active() {
                    Decision::Allow
                } else {
                    Decision::Deny(DenyReason::NotRelated)
                }
            }
            _ => {
                if scope.relation.is_instructor {
                    Decision::Allow
                } else {
                    conceal_unless_related(&scope.relation)
                }
            }
        },
    }
}

fn evaluate_assignment(action: Action, course: &super::resource::CourseScope) -> Decision {
    match action {
        Action::Read => {
            if course.relation.is_instructor || course.relation.is_enrolled_active() {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotRelated)
            }
        }
        _ => {
            if course.relation.is_instructor {
                Decision::Allow
            } else {
                conceal_unless_related(&course.relation)
            }
        }
    }
}

fn evaluate_submission(
    actor: &Actor,
    action: Action,
    student_id: i64,
    status: &SubmissionStatus,
    course: &super::resource::CourseScope,
    grading: bool,
) -> Decision {
    let is_owner = actor.id == student_id;

    match action {
        Action::Read => {
            if is_owner || course.relation.is_instructor {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotRelated)
            }
        }
        Action::Create | Action::Update => {
            if grading {
                // 评分字段只有该课程的教师可写
                if course.relation.is_instructor {
                    return Decision::Allow;
                }
                // 拥有者知道自己的提交存在，给明确 403 而不是 404
                if is_owner {
                    return Decision::Deny(DenyReason::RoleForbidden);
                }
                return conceal_unless_related(&course.relation);
            }
            // 答案内容只有本人可写
            if !is_owner {
                return conceal_unless_related(&course.relation);
            }
            if *status != SubmissionStatus::Draft {
                return Decision::Deny(DenyReason::SubmissionLocked);
            }
            if !course.relation.is_enrolled_active() {
                // 从未选课的主体连作业都不该看到
                if course.relation.enrollment.is_none() {
                    return Decision::Deny(DenyReason::NotRelated);
                }
                return Decision::Deny(DenyReason::NotEnrolled);
            }
            Decision::Allow
        }
        // 提交从不删除
        Action::Delete => conceal_unless_related(&course.relation),
    }
}

fn evaluate_invitation(
    actor: &Actor,
    action: Action,
    invited_by: i64,
    invite_role: Option<&ProfileRole>,
) -> Decision {
    if actor.role != ProfileRole::CourseLeader {
        return Decision::Deny(DenyReason::RoleForbidden);
    }
    match action {
        // 课程负责人只能签发学生邀请
        Action::Create => match invite_role {
            Some(ProfileRole::Student) => Decision::Allow,
            _ => Decision::Deny(DenyReason::RoleForbidden),
        },
        Action::Read | Action::Delete => {
            if invited_by == actor.id {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotRelated)
            }
        }
        Action::Update => Decision::Deny(DenyReason::RoleForbidden),
    }
}

/// 对课程毫无关系的主体隐藏资源存在性，有关系的给出明确拒绝
fn conceal_unless_related(relation: &super::resource::CourseRelation) -> Decision {
    if relation.is_instructor || relation.enrollment.is_some() {
        Decision::Deny(DenyReason::RoleForbidden)
    } else {
        Decision::Deny(DenyReason::NotRelated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::CourseStatus;
    use crate::models::enrollments::entities::EnrollmentStatus;
    use crate::models::profiles::entities::ApprovalStatus;
    use crate::policy::{CourseRelation, CourseScope};

    fn student(id: i64) -> Actor {
        Actor {
            id,
            role: ProfileRole::Student,
            approval_status: ApprovalStatus::Approved,
        }
    }

    fn course_leader(id: i64) -> Actor {
        Actor {
            id,
            role: ProfileRole::CourseLeader,
            approval_status: ApprovalStatus::Approved,
        }
    }

    fn admin(id: i64) -> Actor {
        Actor {
            id,
            role: ProfileRole::Admin,
            approval_status: ApprovalStatus::Approved,
        }
    }

    fn pending_student(id: i64) -> Actor {
        Actor {
            id,
            role: ProfileRole::Student,
            approval_status: ApprovalStatus::Pending,
        }
    }

    fn active_scope(relation: CourseRelation) -> CourseScope {
        CourseScope::new(CourseStatus::Active, relation)
    }

    fn own_draft_submission(student_id: i64, relation: CourseRelation) -> Resource {
        Resource::Submission {
            student_id,
            status: SubmissionStatus::Draft,
            course: active_scope(relation),
            grading: false,
        }
    }

    #[test]
    fn pending_actor_can_only_read_own_profile() {
        let actor = pending_student(7);

        assert_eq!(
            evaluate(&actor, Action::Read, &Resource::Profile { owner_id: 7 }),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&actor, Action::Update, &Resource::Profile { owner_id: 7 }),
            Decision::Deny(DenyReason::NotApproved)
        );
        assert_eq!(
            evaluate(&actor, Action::Read, &Resource::Profile { owner_id: 8 }),
            Decision::Deny(DenyReason::NotApproved)
        );
        assert_eq!(
            evaluate(
                &actor,
                Action::Update,
                &own_draft_submission(7, CourseRelation::enrolled(EnrollmentStatus::Active)),
            ),
            Decision::Deny(DenyReason::NotApproved)
        );
    }

    #[test]
    fn pending_admin_is_still_gated() {
        let actor = Actor {
            id: 1,
            role: ProfileRole::Admin,
            approval_status: ApprovalStatus::Pending,
        };
        assert_eq!(
            evaluate(&actor, Action::Read, &Resource::Profile { owner_id: 2 }),
            Decision::Deny(DenyReason::NotApproved)
        );
    }

    #[test]
    fn admin_allowed_everywhere_except_used_invitation_delete() {
        let actor = admin(1);

        assert_eq!(
            evaluate(
                &actor,
                Action::Update,
                &Resource::Course {
                    status: CourseStatus::Draft,
                    creator_id: 99,
                    relation: CourseRelation::none(),
                    active_enrollments: 10,
                    assignments: 3,
                    active_instructors: 0,
                    changes_status: true,
                },
            ),
            Decision::Allow
        );
        // 已使用邀请的删除是终态，管理员也不例外
        assert_eq!(
            evaluate(
                &actor,
                Action::Delete,
                &Resource::Invitation {
                    invited_by: 1,
                    used: true,
                    invite_role: None,
                },
            ),
            Decision::Deny(DenyReason::AlreadyUsed)
        );
    }

    #[test]
    fn unrelated_student_gets_not_related_on_assignment_read() {
        let actor = student(5);
        let resource = Resource::Assignment {
            course: active_scope(CourseRelation::none()),
        };
        // 隐藏存在性，不能泄露为 ROLE_FORBIDDEN
        assert_eq!(
            evaluate(&actor, Action::Read, &resource),
            Decision::Deny(DenyReason::NotRelated)
        );
    }

    #[test]
    fn active_course_is_publicly_readable_but_not_writable() {
        let actor = student(5);
        let read = Resource::Course {
            status: CourseStatus::Active,
            creator_id: 9,
            relation: CourseRelation::none(),
            active_enrollments: 0,
            assignments: 0,
            active_instructors: 1,
            changes_status: false,
        };
        assert_eq!(evaluate(&actor, Action::Read, &read), Decision::Allow);
        assert_eq!(
            evaluate(&actor, Action::Update, &read),
            Decision::Deny(DenyReason::NotRelated)
        );
    }

    #[test]
    fn draft_course_hidden_from_unrelated_readers() {
        let actor = student(5);
        let resource = Resource::Course {
            status: CourseStatus::Draft,
            creator_id: 9,
            relation: CourseRelation::none(),
            active_enrollments: 0,
            assignments: 0,
            active_instructors: 0,
            changes_status: false,
        };
        assert_eq!(
            evaluate(&actor, Action::Read, &resource),
            Decision::Deny(DenyReason::NotRelated)
        );
    }

    #[test]
    fn instructor_cannot_change_course_status() {
        let actor = course_leader(3);
        let resource = Resource::Course {
            status: CourseStatus::Archived,
            creator_id: 3,
            relation: CourseRelation::instructor(),
            active_enrollments: 0,
            assignments: 0,
            active_instructors: 1,
            changes_status: true,
        };
        assert_eq!(
            evaluate(&actor, Action::Update, &resource),
            Decision::Deny(DenyReason::StatusChangeForbidden)
        );
    }

    #[test]
    fn course_delete_requires_creator_instructor_and_empty() {
        let actor = course_leader(3);
        let non_empty = Resource::Course {
            status: CourseStatus::Draft,
            creator_id: 3,
            relation: CourseRelation::instructor(),
            active_enrollments: 2,
            assignments: 0,
            active_instructors: 1,
            changes_status: false,
        };
        assert_eq!(
            evaluate(&actor, Action::Delete, &non_empty),
            Decision::Deny(DenyReason::CourseNotEmpty)
        );

        let not_creator = Resource::Course {
            status: CourseStatus::Draft,
            creator_id: 4,
            relation: CourseRelation::instructor(),
            active_enrollments: 0,
            assignments: 0,
            active_instructors: 1,
            changes_status: false,
        };
        assert_eq!(
            evaluate(&actor, Action::Delete, &not_creator),
            Decision::Deny(DenyReason::RoleForbidden)
        );

        let empty = Resource::Course {
            status: CourseStatus::Draft,
            creator_id: 3,
            relation: CourseRelation::instructor(),
            active_enrollments: 0,
            assignments: 0,
            active_instructors: 1,
            changes_status: false,
        };
        assert_eq!(evaluate(&actor, Action::Delete, &empty), Decision::Allow);
    }

    #[test]
    fn student_writes_own_draft_with_active_enrollment() {
        let actor = student(5);
        assert_eq!(
            evaluate(
                &actor,
                Action::Update,
                &own_draft_submission(5, CourseRelation::enrolled(EnrollmentStatus::Active)),
            ),
            Decision::Allow
        );
    }

    #[test]
    fn submission_write_locked_after_submit() {
        let actor = student(5);
        let resource = Resource::Submission {
            student_id: 5,
            status: SubmissionStatus::Submitted,
            course: active_scope(CourseRelation::enrolled(EnrollmentStatus::Active)),
            grading: false,
        };
        assert_eq!(
            evaluate(&actor, Action::Update, &resource),
            Decision::Deny(DenyReason::SubmissionLocked)
        );
    }

    #[test]
    fn suspended_enrollment_blocks_draft_writes() {
        let actor = student(5);
        assert_eq!(
            evaluate(
                &actor,
                Action::Update,
                &own_draft_submission(5, CourseRelation::enrolled(EnrollmentStatus::Suspended)),
            ),
            Decision::Deny(DenyReason::NotEnrolled)
        );
        // 从未选课则直接隐藏
        assert_eq!(
            evaluate(
                &student(5),
                Action::Update,
                &own_draft_submission(5, CourseRelation::none()),
            ),
            Decision::Deny(DenyReason::NotRelated)
        );
    }

    #[test]
    fn foreign_submission_write_concealed_or_forbidden() {
        let actor = student(5);
        // 与课程毫无关系：404
        assert_eq!(
            evaluate(
                &actor,
                Action::Update,
                &own_draft_submission(6, CourseRelation::none()),
            ),
            Decision::Deny(DenyReason::NotRelated)
        );
        // 同课同学：明确 403
        assert_eq!(
            evaluate(
                &actor,
                Action::Update,
                &own_draft_submission(6, CourseRelation::enrolled(EnrollmentStatus::Active)),
            ),
            Decision::Deny(DenyReason::RoleForbidden)
        );
    }

    #[test]
    fn cross_course_instructor_cannot_grade() {
        let actor = course_leader(3);
        // 教师身份在 A 课，对 B 课提交没有 instructor 关系
        let resource = Resource::Submission {
            student_id: 5,
            status: SubmissionStatus::Submitted,
            course: active_scope(CourseRelation::none()),
            grading: true,
        };
        assert_eq!(
            evaluate(&actor, Action::Update, &resource),
            Decision::Deny(DenyReason::NotRelated)
        );
    }

    #[test]
    fn instructor_grades_submitted_work() {
        let actor = course_leader(3);
        let resource = Resource::Submission {
            student_id: 5,
            status: SubmissionStatus::Submitted,
            course: active_scope(CourseRelation::instructor()),
            grading: true,
        };
        assert_eq!(evaluate(&actor, Action::Update, &resource), Decision::Allow);
    }

    #[test]
    fn owner_and_instructor_read_submission_others_do_not() {
        let resource = Resource::Submission {
            student_id: 5,
            status: SubmissionStatus::Submitted,
            course: active_scope(CourseRelation::none()),
            grading: false,
        };
        assert_eq!(
            evaluate(&student(5), Action::Read, &resource),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&student(6), Action::Read, &resource),
            Decision::Deny(DenyReason::NotRelated)
        );

        let instructor_view = Resource::Submission {
            student_id: 5,
            status: SubmissionStatus::Submitted,
            course: active_scope(CourseRelation::instructor()),
            grading: false,
        };
        assert_eq!(
            evaluate(&course_leader(3), Action::Read, &instructor_view),
            Decision::Allow
        );
    }

    #[test]
    fn global_question_readable_by_all_writable_by_course_leader() {
        let resource = Resource::Question { course: None };
        assert_eq!(
            evaluate(&student(5), Action::Read, &resource),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&student(5), Action::Update, &resource),
            Decision::Deny(DenyReason::RoleForbidden)
        );
        assert_eq!(
            evaluate(&course_leader(3), Action::Create, &resource),
            Decision::Allow
        );
    }

    #[test]
    fn scoped_question_follows_course_relations() {
        let hidden = Resource::Question {
            course: Some(active_scope(CourseRelation::none())),
        };
        assert_eq!(
            evaluate(&student(5), Action::Read, &hidden),
            Decision::Deny(DenyReason::NotRelated)
        );

        let enrolled = Resource::Question {
            course: Some(active_scope(CourseRelation::enrolled(
                EnrollmentStatus::Active,
            ))),
        };
        assert_eq!(
            evaluate(&student(5), Action::Read, &enrolled),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&student(5), Action::Update, &enrolled),
            Decision::Deny(DenyReason::RoleForbidden)
        );
    }

    #[test]
    fn course_leader_invites_students_only() {
        let actor = course_leader(3);
        assert_eq!(
            evaluate(
                &actor,
                Action::Create,
                &Resource::Invitation {
                    invited_by: 3,
                    used: false,
                    invite_role: Some(ProfileRole::Student),
                },
            ),
            Decision::Allow
        );
        assert_eq!(
            evaluate(
                &actor,
                Action::Create,
                &Resource::Invitation {
                    invited_by: 3,
                    used: false,
                    invite_role: Some(ProfileRole::CourseLeader),
                },
            ),
            Decision::Deny(DenyReason::RoleForbidden)
        );
        // 学生不能签发任何邀请
        assert_eq!(
            evaluate(
                &student(5),
                Action::Create,
                &Resource::Invitation {
                    invited_by: 5,
                    used: false,
                    invite_role: Some(ProfileRole::Student),
                },
            ),
            Decision::Deny(DenyReason::RoleForbidden)
        );
    }

    #[test]
    fn invitation_delete_own_unused_only() {
        let actor = course_leader(3);
        assert_eq!(
            evaluate(
                &actor,
                Action::Delete,
                &Resource::Invitation {
                    invited_by: 3,
                    used: false,
                    invite_role: None,
                },
            ),
            Decision::Allow
        );
        assert_eq!(
            evaluate(
                &actor,
                Action::Delete,
                &Resource::Invitation {
                    invited_by: 4,
                    used: false,
                    invite_role: None,
                },
            ),
            Decision::Deny(DenyReason::NotRelated)
        );
        assert_eq!(
            evaluate(
                &actor,
                Action::Delete,
                &Resource::Invitation {
                    invited_by: 3,
                    used: true,
                    invite_role: None,
                },
            ),
            Decision::Deny(DenyReason::AlreadyUsed)
        );
    }

    #[test]
    fn course_create_is_leader_or_admin() {
        let resource = Resource::Course {
            status: CourseStatus::Draft,
            creator_id: 0,
            relation: CourseRelation::none(),
            active_enrollments: 0,
            assignments: 0,
            active_instructors: 0,
            changes_status: false,
        };
        assert_eq!(
            evaluate(&course_leader(3), Action::Create, &resource),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&student(5), Action::Create, &resource),
            Decision::Deny(DenyReason::RoleForbidden)
        );
        assert_eq!(
            evaluate(&admin(1), Action::Create, &resource),
            Decision::Allow
        );
    }
}
