//! Registration and listing of students and teachers.

use anyhow::Result;

use roster_core::RegistryStore;

pub fn add_student(
    store: &mut RegistryStore,
    name: &str,
    email: &str,
    matricula: &str,
) -> Result<()> {
    let student = store.add_student(name, email, matricula)?;
    println!("Student registered successfully! (id {})", student.id());
    Ok(())
}

pub fn add_teacher(
    store: &mut RegistryStore,
    name: &str,
    email: &str,
    subject: &str,
) -> Result<()> {
    let teacher = store.add_teacher(name, email, subject)?;
    println!("Teacher registered successfully! (id {})", teacher.id());
    Ok(())
}

/// Students first, then teachers, in registration order.
pub fn list_all(store: &RegistryStore) {
    let summaries = store.list_all();
    if summaries.is_empty() {
        println!("Register a student or teacher first.");
        return;
    }

    println!("\nRegistered people:");
    for summary in summaries {
        println!("{summary}");
    }
}
