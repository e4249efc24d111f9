//!
//! 集成测试的通用辅助函数与测试文本
//!
#![allow(dead_code)]

/// 一段足够长的法语文本，'e' 是出现最多的字母
pub const FRENCH_PASSAGE: &str = "\
Le petit village se trouvait au bord de la mer, entre les falaises et les dunes. \
Chaque matin, les pecheurs preparaient leurs filets avant le lever du soleil, et \
les enfants descendaient vers le port pour regarder les bateaux quitter le quai. \
La vieille eglise, elevee au siecle dernier par les habitants eux-memes, dominait \
les maisons basses dont les fenetres restaient ouvertes pendant tout l'ete. \
Le soir, lorsque le vent tombait enfin, les femmes et les hommes se retrouvaient \
devant la petite epicerie pour echanger les nouvelles de la semaine et commenter \
le temps qu'il ferait le lendemain. Personne ne se souvenait d'une tempete aussi \
terrible que celle de l'hiver precedent: elle avait emporte les barques, renverse \
les clotures et inonde les caves de presque toutes les demeures. Depuis ce jour, \
le maire avait decide de faire elever une digue solide entre la plage et le \
village, et chacun participait selon ses moyens a ce chantier immense. Les plus \
jeunes transportaient les pierres, les anciens surveillaient les travaux et \
racontaient les histoires de leurs peres, celles des naufrages et des tresors \
perdus que la mer rendait parfois apres les grandes marees. Le dimanche, une fete \
reunissait tout le monde sur la place; on y mangeait des crepes, on y chantait des \
chansons anciennes et les musiciens jouaient jusqu'a ce que les etoiles eclairent \
le ciel entier. Ensuite chacun rentrait chez soi, le coeur leger, en esperant que \
la semaine suivante serait aussi belle que celle qui venait de se terminer.";

/// 只保留字母的规范化形式
pub fn letters(text: &str) -> String {
    cipher_kit::common::letters_only(text)
}
