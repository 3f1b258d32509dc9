// Initial schema: departments, faculty, students, courses and schedules.
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(super) enum Departments {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Faculty {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    DepartmentId,
    AvatarUrl,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    StudentId,
    FirstName,
    LastName,
    Email,
    DepartmentId,
    Status,
    ClassYear,
    AvatarInitials,
    AvatarColor,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    CourseCode,
    Name,
    DepartmentId,
    #[sea_orm(iden = "isActive")]
    IsActive,
}

#[derive(DeriveIden)]
enum Schedules {
    Table,
    Id,
    CourseId,
    FacultyId,
    StartTime,
    Location,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Faculty::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Faculty::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Faculty::FirstName).text().not_null())
                    .col(ColumnDef::new(Faculty::LastName).text().not_null())
                    .col(ColumnDef::new(Faculty::Email).text().not_null())
                    .col(ColumnDef::new(Faculty::DepartmentId).integer())
                    .col(ColumnDef::new(Faculty::AvatarUrl).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_faculty_department")
                            .from(Faculty::Table, Faculty::DepartmentId)
                            .to(Departments::Table, Departments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).text().not_null())
                    .col(ColumnDef::new(Students::LastName).text().not_null())
                    .col(ColumnDef::new(Students::Email).text().not_null())
                    .col(ColumnDef::new(Students::DepartmentId).integer())
                    .col(
                        ColumnDef::new(Students::Status)
                            .text()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Students::ClassYear).text())
                    .col(ColumnDef::new(Students::AvatarInitials).text().not_null())
                    .col(ColumnDef::new(Students::AvatarColor).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_department")
                            .from(Students::Table, Students::DepartmentId)
                            .to(Departments::Table, Departments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::CourseCode)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).text().not_null())
                    .col(ColumnDef::new(Courses::DepartmentId).integer())
                    .col(
                        ColumnDef::new(Courses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_courses_department")
                            .from(Courses::Table, Courses::DepartmentId)
                            .to(Departments::Table, Departments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::CourseId).integer())
                    .col(ColumnDef::new(Schedules::FacultyId).integer())
                    .col(ColumnDef::new(Schedules::StartTime).text())
                    .col(ColumnDef::new(Schedules::Location).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedules_course")
                            .from(Schedules::Table, Schedules::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedules_faculty")
                            .from(Schedules::Table, Schedules::FacultyId)
                            .to(Faculty::Table, Faculty::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first so foreign keys never dangle
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Faculty::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        Ok(())
    }
}
