//! Service-level catalog workflows

use chrono::NaiveDate;
use locallib_server::{
    models::{AuthorForm, BookForm, BookInstanceStatus, GenreForm},
    services::Outcome,
    AppError,
};
use uuid::Uuid;

use crate::common::*;

#[tokio::test]
async fn author_round_trip_keeps_every_field() {
    let services = services();
    let form = AuthorForm {
        first_name: "Ursula".to_string(),
        family_name: "LeGuin".to_string(),
        date_of_birth: "1929-10-21".to_string(),
        date_of_death: "2018-01-22".to_string(),
    };

    let location = redirected(services.authors.create(form).await.unwrap());
    let id = id_of(&location);
    assert_eq!(location, format!("/catalog/author/{}", id));

    let view = rendered(services.authors.detail(id).await.unwrap());
    let author = view.author.author;
    assert_eq!(author.id, id);
    assert_eq!(author.first_name, "Ursula");
    assert_eq!(author.family_name, "LeGuin");
    assert_eq!(author.date_of_birth, NaiveDate::from_ymd_opt(1929, 10, 21));
    assert_eq!(author.date_of_death, NaiveDate::from_ymd_opt(2018, 1, 22));
    assert_eq!(view.author.name, "LeGuin, Ursula");
    assert_eq!(view.author.dates, "(Oct 21, 1929 - Jan 22, 2018)");
    assert!(view.author_books.is_empty());
}

#[tokio::test]
async fn unreferenced_author_is_deleted() {
    let services = services();
    let id = create_author(&services, "Iain", "Banks").await;

    let location = redirected(services.authors.delete(id).await.unwrap());
    assert_eq!(location, "/catalog/authors");

    let err = services.authors.detail(id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn author_with_books_stays_until_books_are_gone() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let book = create_book(&services, "Earthsea", author, &[]).await;

    for _ in 0..2 {
        match services.authors.delete(author).await.unwrap() {
            Outcome::Blocked(view) => {
                assert_eq!(view.author.author.id, author);
                assert_eq!(view.author_books.len(), 1);
                assert_eq!(view.author_books[0].title, "Earthsea");
            }
            other => panic!("expected a blocked delete, got {:?}", other),
        }
    }
    assert!(services.authors.detail(author).await.is_ok());

    redirected(services.books.delete(book).await.unwrap());
    redirected(services.authors.delete(author).await.unwrap());
    assert!(services.authors.detail(author).await.is_err());
}

#[tokio::test]
async fn author_delete_form_lists_books() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let book = create_book(&services, "Earthsea", author, &[]).await;

    let view = rendered(services.authors.delete_form(author).await.unwrap());
    assert_eq!(view.title, "Delete Author");
    assert_eq!(view.author_books.len(), 1);
    assert_eq!(view.author_books[0].url, format!("/catalog/book/{}", book));
}

#[tokio::test]
async fn delete_form_for_missing_record_returns_to_listing() {
    let services = services();
    let missing = Uuid::new_v4();

    assert_eq!(
        redirected(services.authors.delete_form(missing).await.unwrap()),
        "/catalog/authors"
    );
    assert_eq!(
        redirected(services.books.delete_form(missing).await.unwrap()),
        "/catalog/books"
    );
    assert_eq!(
        redirected(services.genres.delete_form(missing).await.unwrap()),
        "/catalog/genres"
    );
    assert_eq!(
        redirected(services.book_instances.delete_form(missing).await.unwrap()),
        "/catalog/bookinstances"
    );
}

#[tokio::test]
async fn update_preserves_identity() {
    let services = services();
    let id = create_author(&services, "Ursula", "LeGuin").await;

    let location = redirected(
        services
            .authors
            .update(id, author_form("Ursula", "Kroeber"))
            .await
            .unwrap(),
    );
    assert_eq!(id_of(&location), id);

    let view = rendered(services.authors.detail(id).await.unwrap());
    assert_eq!(view.author.author.id, id);
    assert_eq!(view.author.author.family_name, "Kroeber");

    let list = rendered(services.authors.list().await.unwrap());
    assert_eq!(list.author_list.len(), 1);
}

#[tokio::test]
async fn update_of_missing_record_is_not_found() {
    let services = services();
    let err = services
        .authors
        .update(Uuid::new_v4(), author_form("Nobody", "Known"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = services.authors.update_form(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn invalid_author_is_echoed_with_every_error() {
    let services = services();
    let form = AuthorForm {
        first_name: String::new(),
        family_name: "Le Guin".to_string(),
        date_of_birth: "not a date".to_string(),
        date_of_death: String::new(),
    };

    match services.authors.create(form).await.unwrap() {
        Outcome::Invalid(view) => {
            assert_eq!(view.title, "Create Author");
            assert_eq!(view.errors.len(), 4);
            assert_eq!(view.author.family_name, "Le Guin");
            assert_eq!(view.author.date_of_birth, "not a date");
        }
        other => panic!("expected an invalid submission, got {:?}", other),
    }
    assert!(rendered(services.authors.list().await.unwrap())
        .author_list
        .is_empty());
}

#[tokio::test]
async fn authors_are_listed_by_family_name() {
    let services = services();
    create_author(&services, "Patrick", "Rothfuss").await;
    create_author(&services, "Isaac", "Asimov").await;
    create_author(&services, "Ben", "Bova").await;

    let list = rendered(services.authors.list().await.unwrap());
    let names: Vec<_> = list.author_list.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Asimov, Isaac", "Bova, Ben", "Rothfuss, Patrick"]);
}

#[tokio::test]
async fn genre_creation_is_idempotent_by_name() {
    let services = services();
    let first = redirected(
        services
            .genres
            .create(GenreForm {
                name: "Fantasy".to_string(),
            })
            .await
            .unwrap(),
    );
    let second = redirected(
        services
            .genres
            .create(GenreForm {
                name: " Fantasy ".to_string(),
            })
            .await
            .unwrap(),
    );
    assert_eq!(first, second);

    let list = rendered(services.genres.list().await.unwrap());
    assert_eq!(list.genre_list.len(), 1);
    assert_eq!(list.genre_list[0].url, first);
}

#[tokio::test]
async fn genre_listed_by_a_book_cannot_be_deleted() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&services, "Fantasy").await;
    let poetry = create_genre(&services, "Poetry").await;
    create_book(&services, "Earthsea", author, &[fantasy]).await;

    match services.genres.delete(fantasy).await.unwrap() {
        Outcome::Blocked(view) => {
            assert_eq!(view.genre.genre.name, "Fantasy");
            assert_eq!(view.genre_books.len(), 1);
        }
        other => panic!("expected a blocked delete, got {:?}", other),
    }

    redirected(services.genres.delete(poetry).await.unwrap());
    let list = rendered(services.genres.list().await.unwrap());
    let names: Vec<_> = list.genre_list.iter().map(|g| g.genre.name.as_str()).collect();
    assert_eq!(names, vec!["Fantasy"]);
}

#[tokio::test]
async fn book_with_empty_title_and_isbn_reports_two_errors() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let form = BookForm {
        title: "  ".to_string(),
        isbn: String::new(),
        ..book_form("Earthsea", author, &[])
    };

    match services.books.create(form).await.unwrap() {
        Outcome::Invalid(view) => {
            let fields: Vec<_> = view.errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["title", "isbn"]);
            assert_eq!(view.authors.len(), 1);
        }
        other => panic!("expected an invalid submission, got {:?}", other),
    }
}

#[tokio::test]
async fn failed_book_submission_keeps_genre_selection() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&services, "Fantasy").await;
    create_genre(&services, "Poetry").await;

    let form = BookForm {
        summary: String::new(),
        ..book_form("Earthsea", author, &[fantasy])
    };
    let Outcome::Invalid(view) = services.books.create(form).await.unwrap() else {
        panic!("expected an invalid submission");
    };

    assert_eq!(view.book.genre, vec![fantasy.to_string()]);
    for option in &view.genres {
        assert_eq!(option.checked, option.genre.id == fantasy, "{}", option.genre.name);
    }
}

#[tokio::test]
async fn uppercase_genre_id_stays_selected_on_redisplay() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&services, "Fantasy").await;

    let form = BookForm {
        title: String::new(),
        genre: vec![fantasy.to_string().to_uppercase()],
        ..book_form("Earthsea", author, &[])
    };
    let Outcome::Invalid(view) = services.books.create(form).await.unwrap() else {
        panic!("expected an invalid submission");
    };

    let option = view.genres.iter().find(|o| o.genre.id == fantasy).unwrap();
    assert!(option.checked);
}

#[tokio::test]
async fn book_update_form_preselects_current_genres() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&services, "Fantasy").await;
    let poetry = create_genre(&services, "Poetry").await;
    let history = create_genre(&services, "History").await;
    let book = create_book(&services, "Earthsea", author, &[fantasy, history]).await;

    let view = rendered(services.books.update_form(book).await.unwrap());
    assert_eq!(view.title, "Update Book");
    assert_eq!(view.book.title, "Earthsea");
    let checked: Vec<_> = view
        .genres
        .iter()
        .filter(|o| o.checked)
        .map(|o| o.genre.id)
        .collect();
    assert!(checked.contains(&fantasy));
    assert!(checked.contains(&history));
    assert!(!checked.contains(&poetry));
}

#[tokio::test]
async fn book_update_keeps_identifier_and_replaces_genres() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&services, "Fantasy").await;
    let poetry = create_genre(&services, "Poetry").await;
    let book = create_book(&services, "Earthsea", author, &[fantasy]).await;

    let location = redirected(
        services
            .books
            .update(book, book_form("A Wizard of Earthsea", author, &[poetry]))
            .await
            .unwrap(),
    );
    assert_eq!(id_of(&location), book);

    let view = rendered(services.books.detail(book).await.unwrap());
    assert_eq!(view.book.id, book);
    assert_eq!(view.book.title, "A Wizard of Earthsea");
    let genres: Vec<_> = view.book.genre.iter().map(|g| g.genre.id).collect();
    assert_eq!(genres, vec![poetry]);
}

#[tokio::test]
async fn book_detail_resolves_author_genres_and_copies() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let fantasy = create_genre(&services, "Fantasy").await;
    let book = create_book(&services, "Earthsea", author, &[fantasy]).await;
    create_copy(&services, book, "Available").await;
    create_copy(&services, book, "Loaned").await;

    let view = rendered(services.books.detail(book).await.unwrap());
    assert_eq!(view.title, "Earthsea");
    let resolved = view.book.author.expect("author resolved");
    assert_eq!(resolved.name, "LeGuin, Ursula");
    assert_eq!(view.book.genre.len(), 1);
    assert_eq!(view.book.genre[0].genre.name, "Fantasy");
    assert_eq!(view.book_instances.len(), 2);
}

#[tokio::test]
async fn book_with_copies_cannot_be_deleted() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let book = create_book(&services, "Earthsea", author, &[]).await;
    let copy = create_copy(&services, book, "Available").await;

    match services.books.delete(book).await.unwrap() {
        Outcome::Blocked(view) => {
            assert_eq!(view.book.id, book);
            assert_eq!(view.book_instances.len(), 1);
            assert_eq!(view.book_instances[0].instance.id, copy);
        }
        other => panic!("expected a blocked delete, got {:?}", other),
    }
    assert!(services.books.detail(book).await.is_ok());

    redirected(services.book_instances.delete(copy).await.unwrap());
    redirected(services.books.delete(book).await.unwrap());
    assert!(services.books.detail(book).await.is_err());
}

#[tokio::test]
async fn books_are_listed_by_title_with_authors() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    create_book(&services, "The Lathe of Heaven", author, &[]).await;
    create_book(&services, "Earthsea", author, &[]).await;

    let list = rendered(services.books.list().await.unwrap());
    let titles: Vec<_> = list.book_list.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Earthsea", "The Lathe of Heaven"]);
    assert!(list
        .book_list
        .iter()
        .all(|b| b.author.as_ref().map(|a| a.author.id) == Some(author)));
}

#[tokio::test]
async fn copy_without_status_is_in_maintenance() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let book = create_book(&services, "Earthsea", author, &[]).await;
    let copy = create_copy(&services, book, "").await;

    let view = rendered(services.book_instances.detail(copy).await.unwrap());
    assert_eq!(view.title, "Copy: Earthsea");
    assert_eq!(
        view.copy.bookinstance.instance.status,
        BookInstanceStatus::Maintenance
    );
    assert_eq!(view.copy.book.map(|b| b.id), Some(book));
}

#[tokio::test]
async fn copy_update_keeps_identifier() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    let book = create_book(&services, "Earthsea", author, &[]).await;
    let copy = create_copy(&services, book, "Available").await;

    let mut form = copy_form(book, "Loaned");
    form.due_back = "2024-03-09".to_string();
    let location = redirected(services.book_instances.update(copy, form).await.unwrap());
    assert_eq!(id_of(&location), copy);

    let view = rendered(services.book_instances.detail(copy).await.unwrap());
    let instance = view.copy.bookinstance;
    assert_eq!(instance.instance.id, copy);
    assert_eq!(instance.instance.status, BookInstanceStatus::Loaned);
    assert_eq!(instance.due_back_formatted, "Mar 9, 2024");
}

#[tokio::test]
async fn catalog_index_counts_every_collection() {
    let services = services();
    let author = create_author(&services, "Ursula", "LeGuin").await;
    create_genre(&services, "Fantasy").await;
    let book = create_book(&services, "Earthsea", author, &[]).await;
    create_copy(&services, book, "Available").await;
    create_copy(&services, book, "Loaned").await;
    create_copy(&services, book, "Available").await;

    let view = rendered(services.catalog.index().await.unwrap());
    assert_eq!(view.title, "Local Library Home");
    assert_eq!(view.data.book_count, 1);
    assert_eq!(view.data.book_instance_count, 3);
    assert_eq!(view.data.book_instance_available_count, 2);
    assert_eq!(view.data.author_count, 1);
    assert_eq!(view.data.genre_count, 1);
}
