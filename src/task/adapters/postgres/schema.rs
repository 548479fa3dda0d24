//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records. The `project_id` foreign key carries `ON DELETE
    /// CASCADE` in the deployed schema, backing the service-level cascade.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Parent project identifier.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        #[max_length = 1000]
        description -> Varchar,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional deadline date.
        deadline -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Timestamptz,
        /// Autoclose timestamp, set only by the overdue sweep.
        closed_at -> Nullable<Timestamptz>,
    }
}
