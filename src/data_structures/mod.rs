pub mod indexed_heap;
