/// Author profile shown on the profile screen. Not backed by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthorProfile {
    pub username: String,
    pub display_name: String,
    pub handle: String,
    pub level: u32,
    pub rank: u32,
    pub verified: bool,
    pub total_sales: u32,
    pub total_revenue: u32,
    pub author_rank: String,
    pub achievements: Vec<Achievement>,
    pub published: Vec<PublishedTitle>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub unlocked_at: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PublishedTitle {
    pub title: String,
    pub sales: u32,
    pub revenue: u32,
}

impl AuthorProfile {
    pub fn sample() -> Self {
        let achievement = |title: &str, description: &str, unlocked_at: &str| Achievement {
            title: title.into(),
            description: description.into(),
            unlocked_at: unlocked_at.into(),
        };
        let title = |title: &str, sales, revenue| PublishedTitle {
            title: title.into(),
            sales,
            revenue,
        };
        Self {
            username: "johndoe".into(),
            display_name: "John Doe".into(),
            handle: "@johndoe".into(),
            level: 5,
            rank: 3,
            verified: true,
            total_sales: 150,
            total_revenue: 2500,
            author_rank: "Master Storyteller".into(),
            achievements: vec![
                achievement("Bestselling Author", "Reached 100+ book sales", "2024-02-15"),
                achievement("Rising Star", "First book sold out", "2024-01-20"),
                achievement("Community Favorite", "Received 50+ positive reviews", "2024-02-01"),
            ],
            published: vec![
                title("The Great Adventure", 75, 1500),
                title("Mystery of the Night", 50, 750),
                title("Future World", 25, 250),
            ],
        }
    }
}
